//! The feedback widget component.
//!
//! Composes the visibility controller, submission workflow, derived theme
//! tokens and rating scale into one [`Component`] the host embeds in its
//! draw loop. The widget owns its sink and emits [`WidgetEvent`]s for
//! everything the host may want to react to.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use tracing::debug;

use crate::config::{Variant, WidgetConfig};
use crate::models::{build_scale, RatingItem};
use crate::render_mode::{select_render_mode, RenderMode};
use crate::sink::{FeedbackSink, MockSink};
use crate::submission::{SubmissionState, SubmissionWorkflow, WorkflowEvent};
use crate::theme::{derive_tokens, ThemeTokens};
use crate::tui::card::{render_card, CardContext};
use crate::tui::component::{Component, WidgetEvent};
use crate::tui::trigger::render_trigger;
use crate::tui::{anchored_rect, CARD_HEIGHT, CARD_WIDTH, TRIGGER_HEIGHT, TRIGGER_WIDTH};
use crate::visibility::VisibilityController;

/// Which card control currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFocus {
    /// The rating item row.
    Ratings,
    /// The free-text input.
    Text,
    /// The submit control.
    Submit,
}

impl CardFocus {
    const fn next(self) -> Self {
        match self {
            Self::Ratings => Self::Text,
            Self::Text => Self::Submit,
            Self::Submit => Self::Ratings,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Ratings => Self::Submit,
            Self::Text => Self::Ratings,
            Self::Submit => Self::Text,
        }
    }
}

/// Embeddable feedback collection widget.
///
/// Created per mount from a validated [`WidgetConfig`]; dropping it cancels
/// any in-flight submission. Hosts drive it through the [`Component`]
/// trait: forward key events, call [`Component::tick`] once per loop
/// iteration, and render it over the full frame area.
pub struct FeedbackWidget {
    config: WidgetConfig,
    tokens: ThemeTokens,
    scale: Vec<RatingItem>,
    visibility: VisibilityController,
    workflow: SubmissionWorkflow,
    sink: Box<dyn FeedbackSink>,
    focus: CardFocus,
    highlight: usize,
}

impl FeedbackWidget {
    /// Creates a widget from the given configuration.
    ///
    /// Validates the configuration, derives the theme tokens and rating
    /// scale once, and wires up the built-in mock sink. Use
    /// [`Self::with_sink`] to attach a real sink.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation.
    pub fn new(config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        let tokens = derive_tokens(&config.theme);
        let scale = build_scale(config.rating_type, config.rating_items.as_deref());
        let visibility =
            VisibilityController::new(config.variant, config.is_open, config.default_open);
        Ok(Self {
            config,
            tokens,
            scale,
            visibility,
            workflow: SubmissionWorkflow::new(),
            sink: Box::new(MockSink::new()),
            focus: CardFocus::Ratings,
            highlight: 0,
        })
    }

    /// Replaces the submission sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The widget configuration.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The derived theme tokens.
    #[must_use]
    pub const fn tokens(&self) -> &ThemeTokens {
        &self.tokens
    }

    /// The resolved rating scale.
    #[must_use]
    pub fn scale(&self) -> &[RatingItem] {
        &self.scale
    }

    /// Current submission state.
    #[must_use]
    pub const fn submission_state(&self) -> &SubmissionState {
        self.workflow.state()
    }

    /// Whether the widget is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Pushes the host's external open value into a controlled widget.
    ///
    /// Ignored for uncontrolled widgets.
    pub fn set_open(&mut self, value: bool) {
        self.visibility.sync_external(value);
    }

    /// What the widget presents this render cycle.
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        select_render_mode(
            self.config.variant,
            &self.visibility,
            self.config.show_trigger,
            self.config.position,
        )
    }

    /// Handles a close request from inside the card.
    ///
    /// Uncontrolled modals close themselves; controlled ones only notify
    /// the host. Embedded cards cannot close and swallow the request.
    fn close_card(&mut self) -> Option<WidgetEvent> {
        if self.config.variant == Variant::Embedded {
            return None;
        }
        self.focus = CardFocus::Ratings;
        self.highlight = 0;
        if !self.visibility.is_controlled() {
            self.visibility.request_close();
        }
        Some(WidgetEvent::CloseRequested)
    }

    fn select_highlighted(&mut self) {
        if let Some(item) = self.scale.get(self.highlight) {
            self.workflow.select_rating(item.value);
        }
    }

    /// Selects the rating item whose value matches a pressed digit.
    fn select_by_digit(&mut self, digit: u32) {
        if let Some(index) = self.scale.iter().position(|item| item.value == digit) {
            self.highlight = index;
            self.select_highlighted();
        }
    }

    fn handle_card_key(&mut self, key: KeyEvent) -> Option<WidgetEvent> {
        // The acknowledgment and error views reduce to a handful of keys
        match self.workflow.state() {
            SubmissionState::Error { .. } => {
                return match key.code {
                    KeyCode::Enter => {
                        self.workflow.retry();
                        None
                    }
                    KeyCode::Esc => self.close_card(),
                    _ => None,
                };
            }
            SubmissionState::Submitted => {
                return match key.code {
                    KeyCode::Esc => self.close_card(),
                    _ => None,
                };
            }
            SubmissionState::Idle
            | SubmissionState::RatingSelected { .. }
            | SubmissionState::Submitting { .. } => {}
        }

        match key.code {
            KeyCode::Esc => return self.close_card(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        match self.focus {
            CardFocus::Ratings => match key.code {
                KeyCode::Left => {
                    self.highlight = self.highlight.saturating_sub(1);
                }
                KeyCode::Right => {
                    if self.highlight + 1 < self.scale.len() {
                        self.highlight += 1;
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.select_highlighted(),
                KeyCode::Char(ch) => {
                    if let Some(digit) = ch.to_digit(10) {
                        self.select_by_digit(digit);
                    }
                }
                _ => {}
            },
            CardFocus::Text => match key.code {
                KeyCode::Char(ch) => self.workflow.push_char(ch),
                KeyCode::Backspace => self.workflow.pop_char(),
                KeyCode::Enter => self.focus = CardFocus::Submit,
                _ => {}
            },
            CardFocus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.workflow.submit(self.sink.as_ref(), &self.config.source_id);
                }
                KeyCode::Char(ch) => {
                    if let Some(digit) = ch.to_digit(10) {
                        self.select_by_digit(digit);
                    }
                }
                _ => {}
            },
        }
        None
    }
}

impl Component for FeedbackWidget {
    type Event = WidgetEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<WidgetEvent> {
        match self.render_mode() {
            RenderMode::Hidden => None,
            RenderMode::Trigger(_) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.visibility.request_open();
                    self.focus = CardFocus::Ratings;
                    Some(WidgetEvent::Opened)
                }
                _ => None,
            },
            RenderMode::EmbeddedCard | RenderMode::Overlay(_) => self.handle_card_key(key),
        }
    }

    fn tick(&mut self, now: Instant) -> Option<WidgetEvent> {
        match self.workflow.tick(now)? {
            WorkflowEvent::SubmissionAccepted => Some(WidgetEvent::SubmissionAccepted),
            WorkflowEvent::SubmissionFailed(reason) => {
                Some(WidgetEvent::SubmissionFailed(reason))
            }
            WorkflowEvent::CycleCompleted => {
                debug!("feedback cycle completed, resetting widget");
                self.focus = CardFocus::Ratings;
                self.highlight = 0;
                if !self.visibility.is_controlled() {
                    self.visibility.request_close();
                }
                // The host is notified in every variant and mode; only the
                // uncontrolled modal actually closes itself
                Some(WidgetEvent::CloseRequested)
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let ctx = CardContext {
            config: &self.config,
            tokens: &self.tokens,
            scale: &self.scale,
            workflow: &self.workflow,
            focus: self.focus,
            highlight: self.highlight,
        };

        match self.render_mode() {
            RenderMode::Hidden => {}
            RenderMode::EmbeddedCard => render_card(f, area, &ctx),
            RenderMode::Trigger(position) => {
                let rect = anchored_rect(position, area, TRIGGER_WIDTH, TRIGGER_HEIGHT);
                render_trigger(f, rect, &self.config, &self.tokens);
            }
            RenderMode::Overlay(position) => {
                let rect = anchored_rect(position, area, CARD_WIDTH, CARD_HEIGHT);
                render_card(f, rect, &ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;
    use crate::sink::MockSink;
    use std::time::Duration;

    fn modal_config() -> WidgetConfig {
        WidgetConfig::new("docs")
    }

    fn embedded_config() -> WidgetConfig {
        let mut config = WidgetConfig::new("docs");
        config.variant = Variant::Embedded;
        config
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_trigger_opens_uncontrolled_modal() {
        let mut widget = FeedbackWidget::new(modal_config()).unwrap();
        assert_eq!(widget.render_mode(), RenderMode::Trigger(Position::BottomRight));

        let event = widget.handle_input(key(KeyCode::Enter));
        assert_eq!(event, Some(WidgetEvent::Opened));
        assert_eq!(widget.render_mode(), RenderMode::Overlay(Position::BottomRight));
    }

    #[test]
    fn test_escape_closes_uncontrolled_modal() {
        let mut widget = FeedbackWidget::new(modal_config()).unwrap();
        widget.handle_input(key(KeyCode::Enter));
        assert!(widget.is_open());

        let event = widget.handle_input(key(KeyCode::Esc));
        assert_eq!(event, Some(WidgetEvent::CloseRequested));
        assert!(!widget.is_open());
        assert_eq!(widget.render_mode(), RenderMode::Trigger(Position::BottomRight));
    }

    #[test]
    fn test_escape_on_embedded_card_is_noop() {
        let mut widget = FeedbackWidget::new(embedded_config()).unwrap();
        assert_eq!(widget.render_mode(), RenderMode::EmbeddedCard);

        let event = widget.handle_input(key(KeyCode::Esc));
        assert_eq!(event, None);
        assert_eq!(widget.render_mode(), RenderMode::EmbeddedCard);
    }

    #[test]
    fn test_controlled_modal_only_notifies_on_escape() {
        let mut config = modal_config();
        config.is_open = Some(true);
        let mut widget = FeedbackWidget::new(config).unwrap();
        assert!(widget.is_open());

        let event = widget.handle_input(key(KeyCode::Esc));
        assert_eq!(event, Some(WidgetEvent::CloseRequested));
        // Still open until the host pushes a new external value
        assert!(widget.is_open());

        widget.set_open(false);
        assert!(!widget.is_open());
        assert_eq!(widget.render_mode(), RenderMode::Hidden);
    }

    #[test]
    fn test_digit_selects_rating() {
        let mut widget = FeedbackWidget::new(embedded_config()).unwrap();
        widget.handle_input(key(KeyCode::Char('4')));
        assert_eq!(widget.submission_state().rating(), Some(4));
    }

    #[test]
    fn test_arrow_navigation_and_enter_select() {
        let mut widget = FeedbackWidget::new(embedded_config()).unwrap();
        widget.handle_input(key(KeyCode::Right));
        widget.handle_input(key(KeyCode::Right));
        widget.handle_input(key(KeyCode::Enter));
        assert_eq!(widget.submission_state().rating(), Some(3));

        // Highlight clamps at the ends of the scale
        for _ in 0..10 {
            widget.handle_input(key(KeyCode::Right));
        }
        widget.handle_input(key(KeyCode::Enter));
        assert_eq!(widget.submission_state().rating(), Some(5));
    }

    #[test]
    fn test_text_editing_behind_tab_focus() {
        let mut widget = FeedbackWidget::new(embedded_config()).unwrap();
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Char('o')));
        widget.handle_input(key(KeyCode::Char('k')));
        widget.handle_input(key(KeyCode::Char('!')));
        widget.handle_input(key(KeyCode::Backspace));
        assert_eq!(widget.submission_state(), &SubmissionState::Idle);

        widget.handle_input(key(KeyCode::BackTab));
        widget.handle_input(key(KeyCode::Char('5')));
        assert_eq!(widget.submission_state().rating(), Some(5));
    }

    #[test]
    fn test_full_cycle_closes_uncontrolled_modal() {
        let mut widget = FeedbackWidget::new(modal_config())
            .unwrap()
            .with_sink(MockSink::accepting(Duration::ZERO));
        let now = Instant::now();

        widget.handle_input(key(KeyCode::Enter)); // open via trigger
        widget.handle_input(key(KeyCode::Char('4')));
        widget.handle_input(key(KeyCode::Tab)); // text
        widget.handle_input(key(KeyCode::Char('h')));
        widget.handle_input(key(KeyCode::Char('i')));
        widget.handle_input(key(KeyCode::Tab)); // submit
        widget.handle_input(key(KeyCode::Enter));
        assert_eq!(
            widget.submission_state(),
            &SubmissionState::Submitting { rating: 4 }
        );

        assert_eq!(widget.tick(now), Some(WidgetEvent::SubmissionAccepted));
        assert_eq!(widget.submission_state(), &SubmissionState::Submitted);

        // Acknowledgment stays up for its display window
        assert_eq!(widget.tick(now + Duration::from_millis(1999)), None);

        let event = widget.tick(now + Duration::from_millis(2000));
        assert_eq!(event, Some(WidgetEvent::CloseRequested));
        assert_eq!(widget.submission_state(), &SubmissionState::Idle);
        assert!(!widget.is_open());
    }

    #[test]
    fn test_full_cycle_keeps_controlled_modal_open() {
        let mut config = modal_config();
        config.is_open = Some(true);
        let mut widget = FeedbackWidget::new(config)
            .unwrap()
            .with_sink(MockSink::accepting(Duration::ZERO));
        let now = Instant::now();

        widget.handle_input(key(KeyCode::Char('2')));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Enter));
        widget.tick(now);

        let event = widget.tick(now + Duration::from_millis(2000));
        assert_eq!(event, Some(WidgetEvent::CloseRequested));
        // The host owns visibility; the widget stays open
        assert!(widget.is_open());
    }

    #[test]
    fn test_embedded_cycle_notifies_host() {
        let mut widget = FeedbackWidget::new(embedded_config())
            .unwrap()
            .with_sink(MockSink::accepting(Duration::ZERO));
        let now = Instant::now();

        widget.handle_input(key(KeyCode::Char('4')));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Enter));
        widget.tick(now);

        // The reset notifies the host in the embedded variant too, even
        // though the card itself never goes away
        assert_eq!(
            widget.tick(now + Duration::from_millis(2000)),
            Some(WidgetEvent::CloseRequested)
        );
        assert_eq!(widget.submission_state(), &SubmissionState::Idle);
        assert_eq!(widget.render_mode(), RenderMode::EmbeddedCard);
    }

    #[test]
    fn test_controlled_reopen_resets_focus() {
        let mut config = modal_config();
        config.is_open = Some(true);
        let mut widget = FeedbackWidget::new(config).unwrap();

        widget.handle_input(key(KeyCode::Tab)); // focus moves to text
        widget.handle_input(key(KeyCode::Esc));
        widget.set_open(false);
        widget.set_open(true);

        // Focus is back on the rating row, so a digit picks a rating
        // instead of landing in the text field
        widget.handle_input(key(KeyCode::Char('4')));
        assert_eq!(widget.submission_state().rating(), Some(4));
    }

    #[test]
    fn test_rejection_then_retry() {
        let mut widget = FeedbackWidget::new(embedded_config())
            .unwrap()
            .with_sink(MockSink::rejecting(Duration::ZERO, "backend unavailable"));
        let now = Instant::now();

        widget.handle_input(key(KeyCode::Char('1')));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Tab));
        widget.handle_input(key(KeyCode::Enter));

        assert_eq!(
            widget.tick(now),
            Some(WidgetEvent::SubmissionFailed("backend unavailable".to_string()))
        );

        widget.handle_input(key(KeyCode::Enter)); // retry
        assert_eq!(
            widget.submission_state(),
            &SubmissionState::RatingSelected { rating: 1 }
        );
    }

    #[test]
    fn test_input_ignored_while_hidden() {
        let mut config = modal_config();
        config.is_open = Some(false);
        let mut widget = FeedbackWidget::new(config).unwrap();

        assert_eq!(widget.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(widget.render_mode(), RenderMode::Hidden);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WidgetConfig::new("");
        assert!(FeedbackWidget::new(config).is_err());
    }
}
