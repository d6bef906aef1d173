//! Visibility reconciliation for controlled and uncontrolled widgets.
//!
//! The operating mode is fixed once per mount: when the host supplies an
//! external `is_open` value the controller only mirrors it; otherwise the
//! controller owns the boolean itself. The embedded variant bypasses the
//! controller entirely.

use crate::config::Variant;

/// Reported visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// The widget is hidden (or showing only its trigger).
    Closed,
    /// The widget card is visible.
    Open,
}

/// Which side owns the open/closed decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode {
    /// Controlled: the host supplies and refreshes the value; the widget
    /// never decides its own state.
    External,
    /// Uncontrolled: the widget owns and mutates the value.
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    External { open: bool },
    Internal { open: bool },
}

/// Reconciles externally-controlled and self-managed open/closed state.
///
/// Close/open requests only mutate state in [`VisibilityMode::Internal`];
/// in external mode the widget layer notifies the host instead and trusts
/// it to push the new value via [`VisibilityController::sync_external`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityController {
    variant: Variant,
    mode: Mode,
}

impl VisibilityController {
    /// Creates a controller, selecting the operating mode from whether the
    /// host supplied an external value.
    #[must_use]
    pub fn new(variant: Variant, is_open: Option<bool>, default_open: bool) -> Self {
        let mode = match is_open {
            Some(open) => Mode::External { open },
            None => Mode::Internal { open: default_open },
        };
        Self { variant, mode }
    }

    /// The operating mode fixed at construction.
    #[must_use]
    pub const fn mode(&self) -> VisibilityMode {
        match self.mode {
            Mode::External { .. } => VisibilityMode::External,
            Mode::Internal { .. } => VisibilityMode::Internal,
        }
    }

    /// Whether the host owns the visibility value.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self.mode, Mode::External { .. })
    }

    /// Current visibility. The embedded variant is always treated as open.
    #[must_use]
    pub const fn state(&self) -> VisibilityState {
        if matches!(self.variant, Variant::Embedded) {
            return VisibilityState::Open;
        }
        let open = match self.mode {
            Mode::External { open } | Mode::Internal { open } => open,
        };
        if open {
            VisibilityState::Open
        } else {
            VisibilityState::Closed
        }
    }

    /// Convenience accessor for `state() == Open`.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state(), VisibilityState::Open)
    }

    /// Requests opening from inside the widget.
    ///
    /// Mutates only internal state; in external mode opening is entirely
    /// the host's responsibility and this is a no-op. No-op for embedded.
    pub fn request_open(&mut self) {
        if matches!(self.variant, Variant::Embedded) {
            return;
        }
        if let Mode::Internal { open } = &mut self.mode {
            *open = true;
        }
    }

    /// Requests closing from inside the widget (close button or
    /// post-submission auto-close).
    ///
    /// Mutates only internal state; the widget layer notifies the host in
    /// both modes. No-op for embedded.
    pub fn request_close(&mut self) {
        if matches!(self.variant, Variant::Embedded) {
            return;
        }
        if let Mode::Internal { open } = &mut self.mode {
            *open = false;
        }
    }

    /// Applies a host configuration push of the external value.
    ///
    /// No-op in internal mode.
    pub fn sync_external(&mut self, value: bool) {
        if let Mode::External { open } = &mut self.mode {
            *open = value;
        }
    }
}
