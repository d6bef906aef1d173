//! Loopback - embeddable feedback collection widget for terminal UIs.
//!
//! This library provides a self-contained feedback widget (rating scale,
//! optional free text, submission lifecycle) that host applications embed
//! in their draw loop, plus the pure building blocks behind it: theme
//! token derivation, visibility control, render-mode selection and the
//! submission state machine.

// Module declarations
pub mod config;
pub mod constants;
pub mod models;
pub mod render_mode;
pub mod sink;
pub mod submission;
pub mod theme;
pub mod tui;
pub mod visibility;

pub use config::{Position, RatingType, Variant, WidgetConfig};
pub use sink::{FeedbackPayload, FeedbackSink, MockSink, SinkOutcome};
pub use submission::{SubmissionState, SubmissionWorkflow};
pub use theme::{derive_tokens, ThemeTokens, TokenName, TokenValue};
pub use tui::{Component, FeedbackWidget, WidgetEvent};
pub use visibility::VisibilityController;
