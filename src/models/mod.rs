//! Data models for rating scales and colors.
//!
//! This module contains the core data structures used throughout the widget.
//! Models are designed to be independent of UI and business logic.

pub mod rating;
pub mod rgb;

// Re-export all model types
pub use rating::{accessible_label, build_scale, RatingItem};
pub use rgb::RgbColor;
