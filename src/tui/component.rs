//! Component trait pattern for TUI components.
//!
//! This module defines the trait and event types used to implement
//! self-contained, testable TUI components that handle their own input and
//! rendering and notify their host through emitted events.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

/// A component that can be rendered and handle input.
///
/// Components are self-contained UI elements that manage their own state,
/// handle keyboard input, and can emit events to communicate with the host.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to
    /// the host. Returns `None` if input was handled internally without
    /// needing host action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component.
    ///
    /// The component should render itself within the provided area.
    fn render(&self, f: &mut Frame, area: Rect);

    /// Advance time-driven state.
    ///
    /// Hosts call this once per loop iteration with the current time so
    /// the component can apply due timer transitions. Default
    /// implementation has no timers.
    fn tick(&mut self, _now: Instant) -> Option<Self::Event> {
        None
    }
}

/// Events emitted by the feedback widget for the host to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The widget requests closing.
    ///
    /// This is the host-callback notification: uncontrolled widgets have
    /// already closed themselves when this is emitted; controlled hosts
    /// are expected to flip their external value in response.
    CloseRequested,

    /// The widget opened itself via its trigger (uncontrolled only).
    Opened,

    /// The sink accepted a response; the acknowledgment view is showing.
    SubmissionAccepted,

    /// The sink rejected a response with the given reason.
    SubmissionFailed(String),
}
