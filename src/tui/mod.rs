//! Terminal rendering layer for the feedback widget.
//!
//! This module contains the `Component` trait, the [`FeedbackWidget`]
//! composition, the card/trigger renderers, and terminal lifecycle helpers
//! for hosts that do not manage their own terminal.

pub mod card;
pub mod component;
pub mod trigger;
pub mod widget;

pub use component::{Component, WidgetEvent};
pub use widget::{CardFocus, FeedbackWidget};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;

use crate::config::Position;

/// Width of the overlay feedback card in terminal cells.
pub(crate) const CARD_WIDTH: u16 = 46;

/// Height of the overlay feedback card in terminal cells.
pub(crate) const CARD_HEIGHT: u16 = 17;

/// Width of the floating trigger button.
pub(crate) const TRIGGER_WIDTH: u16 = 6;

/// Height of the floating trigger button.
pub(crate) const TRIGGER_HEIGHT: u16 = 3;

/// Margin kept between anchored elements and the frame edge.
const ANCHOR_MARGIN: u16 = 2;

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Computes the rect for an element anchored at a viewport position.
///
/// The element is clamped to the available area when the frame is smaller
/// than the requested size.
pub(crate) fn anchored_rect(position: Position, area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let (x, y) = match position {
        Position::BottomRight => (
            area.right()
                .saturating_sub(width + ANCHOR_MARGIN)
                .max(area.x),
            area.bottom()
                .saturating_sub(height + ANCHOR_MARGIN / 2)
                .max(area.y),
        ),
        Position::BottomLeft => (
            area.x + ANCHOR_MARGIN.min(area.width.saturating_sub(width)),
            area.bottom()
                .saturating_sub(height + ANCHOR_MARGIN / 2)
                .max(area.y),
        ),
        Position::Center => (
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
        ),
    };

    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_rect_positions() {
        let area = Rect::new(0, 0, 100, 40);

        let br = anchored_rect(Position::BottomRight, area, 46, 17);
        assert_eq!(br.right(), 98);
        assert_eq!(br.bottom(), 39);

        let bl = anchored_rect(Position::BottomLeft, area, 46, 17);
        assert_eq!(bl.x, 2);
        assert_eq!(bl.bottom(), 39);

        let center = anchored_rect(Position::Center, area, 46, 17);
        assert_eq!(center.x, 27);
        assert_eq!(center.y, 11);
    }

    #[test]
    fn test_anchored_rect_clamps_to_small_frames() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = anchored_rect(Position::BottomRight, area, 46, 17);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
