//! Application-wide constants.
//!
//! This module defines constants used throughout the widget and demo
//! application, including default copy and lifecycle timings.

/// The display name of the application (human-readable).
pub const APP_NAME: &str = "Loopback";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "loopback";

/// Delay applied by the simulated submission sink.
pub const MOCK_SINK_DELAY_MS: u64 = 1000;

/// How long the acknowledgment view stays up before the widget resets.
pub const ACK_DISPLAY_MS: u64 = 2000;

/// Default card header title.
pub const DEFAULT_TITLE: &str = "Give us your feedback";

/// Default card header subtitle.
pub const DEFAULT_SUBTITLE: &str = "What was your experience?";

/// Default free-text placeholder.
pub const DEFAULT_PLACEHOLDER: &str = "Please write here...";

/// Default label under the lowest rating item.
pub const DEFAULT_LABEL_LOW: &str = "Dissatisfied";

/// Default label under the highest rating item.
pub const DEFAULT_LABEL_HIGH: &str = "Satisfied";

/// Default label above the free-text field.
pub const DEFAULT_LABEL_TEXTAREA: &str = "Write your feedback";

/// Default submit button label.
pub const DEFAULT_LABEL_SUBMIT: &str = "Submit";

/// Submit button label while a submission is in flight.
pub const LABEL_SUBMITTING: &str = "Submitting...";

/// Acknowledgment view title.
pub const ACK_TITLE: &str = "Thank you!";

/// Acknowledgment view subtitle.
pub const ACK_SUBTITLE: &str = "Your feedback has been received.";

/// Glyph shown on the floating trigger button.
pub const TRIGGER_GLYPH: &str = "💬";
