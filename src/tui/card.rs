//! Feedback card rendering.
//!
//! The card shows one of three sub-views based on the submission state:
//! the input view (header, rating items, text field, submit control), the
//! acknowledgment view, or the error view with its retry affordance.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::{RatingType, Variant, WidgetConfig};
use crate::constants::{ACK_SUBTITLE, ACK_TITLE, LABEL_SUBMITTING};
use crate::models::{accessible_label, RatingItem};
use crate::submission::{SubmissionState, SubmissionWorkflow};
use crate::theme::{ThemeTokens, TokenName};
use crate::tui::widget::CardFocus;

/// Everything the card renderer needs for one frame.
pub(crate) struct CardContext<'a> {
    pub config: &'a WidgetConfig,
    pub tokens: &'a ThemeTokens,
    pub scale: &'a [RatingItem],
    pub workflow: &'a SubmissionWorkflow,
    pub focus: CardFocus,
    pub highlight: usize,
}

/// Renders the feedback card into the given area.
pub(crate) fn render_card(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    f.render_widget(Clear, area);

    // Card background from tokens, with the host's card style hook on top
    let mut bg_style = Style::default();
    if let Some(background) = ctx.tokens.color(TokenName::Background) {
        bg_style = bg_style.bg(background);
    }
    let bg_style = ctx.config.styles.card.apply(bg_style);
    f.render_widget(Block::default().style(bg_style), area);

    let border_color = ctx
        .tokens
        .color(TokenName::Border)
        .or_else(|| ctx.tokens.color(TokenName::Primary));
    let border_type = if ctx.config.theme.border_radius.unwrap_or(0) > 0 {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(maybe_fg(Style::default(), border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match ctx.workflow.state() {
        SubmissionState::Submitted => render_ack_view(f, inner, ctx),
        SubmissionState::Error { reason, .. } => render_error_view(f, inner, ctx, reason),
        SubmissionState::Idle
        | SubmissionState::RatingSelected { .. }
        | SubmissionState::Submitting { .. } => render_input_view(f, inner, ctx),
    }
}

fn render_input_view(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header (title + subtitle)
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Rating items
            Constraint::Length(1), // Low/high scale labels
            Constraint::Length(1), // Accessible hint
            Constraint::Length(1), // Free-text label
            Constraint::Length(3), // Free-text input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Submit control
            Constraint::Min(1),    // Help
        ])
        .split(area);

    render_header(f, chunks[0], ctx);
    render_ratings(f, chunks[2], ctx);
    render_scale_labels(f, chunks[3], ctx);
    render_hint(f, chunks[4], ctx);
    render_text_label(f, chunks[5], ctx);
    render_text_input(f, chunks[6], ctx);
    render_submit(f, chunks[8], ctx);
    render_help(f, chunks[9], ctx);
}

fn render_header(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let title_color = ctx
        .tokens
        .color(TokenName::Primary)
        .or_else(|| ctx.tokens.color(TokenName::Text));
    let title = Span::styled(
        ctx.config.content.title(),
        maybe_fg(Style::default(), title_color).add_modifier(Modifier::BOLD),
    );
    let subtitle = Span::styled(
        ctx.config.content.subtitle(),
        secondary_style(ctx.tokens),
    );
    let header = Paragraph::new(vec![Line::from(title), Line::from(subtitle)]);
    f.render_widget(header, area);
}

fn render_ratings(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let rating = ctx.workflow.rating();
    let mut spans = vec![Span::raw(" ")];

    for (index, item) in ctx.scale.iter().enumerate() {
        let glyph = item.glyph(ctx.config.rating_type, rating);
        let selected = rating == Some(item.value);

        let mut style = maybe_fg(Style::default(), ctx.tokens.color(TokenName::Text));
        if let Some(accent) = ctx.tokens.color(TokenName::AccentBackground) {
            style = style.bg(accent);
        }
        if selected {
            style = match ctx.tokens.color(TokenName::AccentSelected) {
                Some(selected_bg) => style.bg(selected_bg).add_modifier(Modifier::BOLD),
                None => style.add_modifier(Modifier::BOLD),
            };
        }
        if ctx.focus == CardFocus::Ratings && index == ctx.highlight {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let style = ctx.config.styles.rating.apply(style);

        spans.push(Span::styled(format!(" {glyph} "), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_scale_labels(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let halves = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let style = secondary_style(ctx.tokens);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", ctx.config.content.label_low()),
            style,
        )),
        halves[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", ctx.config.content.label_high()),
            style,
        ))
        .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_hint(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    // Numeric scales describe the highlighted value while the rating row
    // has focus
    if ctx.config.rating_type != RatingType::Number || ctx.focus != CardFocus::Ratings {
        return;
    }
    let Some(item) = ctx.scale.get(ctx.highlight) else {
        return;
    };
    let hint = Paragraph::new(Span::styled(
        format!(" {}", accessible_label(item.value, ctx.scale.len())),
        secondary_style(ctx.tokens).add_modifier(Modifier::DIM),
    ));
    f.render_widget(hint, area);
}

fn render_text_label(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let label = Paragraph::new(Line::from(vec![
        Span::styled(
            ctx.config.content.label_textarea().to_string(),
            secondary_style(ctx.tokens),
        ),
        Span::styled(
            " (optional)",
            secondary_style(ctx.tokens).add_modifier(Modifier::DIM),
        ),
    ]));
    f.render_widget(label, area);
}

fn render_text_input(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let mut input_style = maybe_fg(Style::default(), ctx.tokens.color(TokenName::Text));
    if let Some(input_bg) = ctx.tokens.color(TokenName::InputBackground) {
        input_style = input_style.bg(input_bg);
    }

    let border_color = if ctx.focus == CardFocus::Text {
        ctx.tokens
            .color(TokenName::FocusRing)
            .or_else(|| ctx.tokens.color(TokenName::Primary))
    } else {
        ctx.tokens.color(TokenName::Border)
    };

    let text = ctx.workflow.text();
    let content = if text.is_empty() && ctx.focus != CardFocus::Text {
        Span::styled(
            ctx.config.content.placeholder().to_string(),
            input_style.add_modifier(Modifier::DIM),
        )
    } else if ctx.focus == CardFocus::Text && ctx.workflow.is_editable() {
        Span::styled(format!("{text}█"), input_style)
    } else {
        Span::styled(text.to_string(), input_style)
    };

    let input = Paragraph::new(Line::from(content))
        .style(input_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(maybe_fg(Style::default(), border_color)),
        );
    f.render_widget(input, area);
}

fn render_submit(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let submitting = ctx.workflow.is_submitting();
    let enabled = matches!(
        ctx.workflow.state(),
        SubmissionState::RatingSelected { .. }
    );

    let label = if submitting {
        LABEL_SUBMITTING
    } else {
        ctx.config.content.label_submit()
    };

    let mut style = if enabled {
        let color = ctx
            .tokens
            .color(TokenName::Primary)
            .or_else(|| ctx.tokens.color(TokenName::Text));
        maybe_fg(Style::default(), color).add_modifier(Modifier::BOLD)
    } else {
        // Disabled while submitting or before a rating is chosen
        Style::default().add_modifier(Modifier::DIM)
    };
    if ctx.focus == CardFocus::Submit {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let style = ctx.config.styles.submit.apply(style);

    let submit = Paragraph::new(Span::styled(format!(" [ {label} ] "), style));
    f.render_widget(submit, area);
}

fn render_help(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let help = if ctx.config.variant == Variant::Modal {
        " Tab Focus  Enter Select/Submit  Esc Close"
    } else {
        " Tab Focus  Enter Select/Submit"
    };
    let help = Paragraph::new(Span::styled(
        help,
        secondary_style(ctx.tokens).add_modifier(Modifier::DIM),
    ));
    f.render_widget(help, area);
}

fn render_ack_view(f: &mut Frame, area: Rect, ctx: &CardContext<'_>) {
    let title_color = ctx
        .tokens
        .color(TokenName::Primary)
        .or_else(|| ctx.tokens.color(TokenName::Text));
    let lines = vec![
        Line::from(""),
        Line::from("🎉"),
        Line::from(""),
        Line::from(Span::styled(
            ACK_TITLE,
            maybe_fg(Style::default(), title_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(ACK_SUBTITLE, secondary_style(ctx.tokens))),
    ];
    let ack = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(ack, area);
}

fn render_error_view(f: &mut Frame, area: Rect, ctx: &CardContext<'_>, reason: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚠  Submission failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            reason.to_string(),
            maybe_fg(Style::default(), ctx.tokens.color(TokenName::Text)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter Retry  Esc Close",
            secondary_style(ctx.tokens).add_modifier(Modifier::DIM),
        )),
    ];
    let error = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(error, area);
}

fn secondary_style(tokens: &ThemeTokens) -> Style {
    let color = tokens
        .color(TokenName::TextSecondary)
        .or_else(|| tokens.color(TokenName::Text));
    maybe_fg(Style::default(), color)
}

fn maybe_fg(style: Style, color: Option<Color>) -> Style {
    color.map_or(style, |color| style.fg(color))
}
