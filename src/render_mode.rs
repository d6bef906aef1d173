//! Render-mode decision tree.
//!
//! A pure projection over static configuration and the current visibility
//! state; evaluated once per render cycle.

use crate::config::{Position, Variant};
use crate::visibility::{VisibilityController, VisibilityMode, VisibilityState};

/// What the widget presents this render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The feedback card alone, rendered inline.
    EmbeddedCard,
    /// Nothing at all.
    Hidden,
    /// Only the floating trigger button, anchored at the position.
    Trigger(Position),
    /// A full overlay containing the feedback card, anchored at the
    /// position. Modal: it captures all interaction within its bounds and
    /// defines no outside-click dismissal.
    Overlay(Position),
}

/// Decides the render mode for the current cycle.
///
/// - Embedded variant always yields the inline card; visibility is
///   irrelevant.
/// - A closed controlled modal renders nothing (the host decides when to
///   show it).
/// - A closed uncontrolled modal renders the trigger, or nothing when the
///   trigger is disabled.
/// - An open modal renders the overlay in either mode.
///
/// # Examples
///
/// ```
/// use loopback::config::{Position, Variant};
/// use loopback::render_mode::{select_render_mode, RenderMode};
/// use loopback::visibility::VisibilityController;
///
/// let visibility = VisibilityController::new(Variant::Modal, None, false);
/// let mode = select_render_mode(Variant::Modal, &visibility, true, Position::BottomRight);
/// assert_eq!(mode, RenderMode::Trigger(Position::BottomRight));
/// ```
#[must_use]
pub fn select_render_mode(
    variant: Variant,
    visibility: &VisibilityController,
    show_trigger: bool,
    position: Position,
) -> RenderMode {
    if variant == Variant::Embedded {
        return RenderMode::EmbeddedCard;
    }

    match (visibility.state(), visibility.mode()) {
        (VisibilityState::Open, _) => RenderMode::Overlay(position),
        (VisibilityState::Closed, VisibilityMode::External) => RenderMode::Hidden,
        (VisibilityState::Closed, VisibilityMode::Internal) => {
            if show_trigger {
                RenderMode::Trigger(position)
            } else {
                RenderMode::Hidden
            }
        }
    }
}
