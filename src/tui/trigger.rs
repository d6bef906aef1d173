//! Floating trigger button rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::WidgetConfig;
use crate::constants::TRIGGER_GLYPH;
use crate::theme::{ThemeTokens, TokenName};

/// Renders the floating trigger button into the given area.
pub(crate) fn render_trigger(
    f: &mut Frame,
    area: Rect,
    config: &WidgetConfig,
    tokens: &ThemeTokens,
) {
    f.render_widget(Clear, area);

    let mut style = Style::default();
    if let Some(primary) = tokens.color(TokenName::Primary) {
        style = style.bg(primary).fg(Color::White);
    } else if let Some(background) = tokens.color(TokenName::Background) {
        style = style.bg(background);
    }
    let style = config.styles.trigger.apply(style);

    let border_type = if config.theme.border_radius.unwrap_or(0) > 0 {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };

    let trigger = Paragraph::new(Span::styled(
        TRIGGER_GLYPH,
        style.add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .style(style)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(style),
    );
    f.render_widget(trigger, area);
}
