//! Rating scale construction and item render policy.
//!
//! The scale builder derives the ordered list of selectable rating items
//! from configuration; the render policy decides which glyph each item
//! shows given the currently selected rating.

use serde::{Deserialize, Serialize};

use crate::config::RatingType;

/// Number of items in the default rating scale.
pub const DEFAULT_SCALE_LEN: u32 = 5;

/// Fixed emoji scale, crying through ecstatic, values 1-5.
const EMOJI_GLYPHS: [&str; DEFAULT_SCALE_LEN as usize] = ["😭", "😟", "😐", "😊", "🤩"];

/// Filled star glyph for items at or below the current rating.
const STAR_FILLED: &str = "★";

/// Outline star glyph for items above the current rating.
const STAR_EMPTY: &str = "☆";

/// A single selectable rating item.
///
/// Hosts may supply their own items (values need not be contiguous); the
/// default-generated scale is always values 1-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingItem {
    /// Rating value submitted when this item is picked (>= 1).
    pub value: u32,
    /// Label shown for this item (glyph or text).
    pub label: String,
}

impl RatingItem {
    /// Creates a new rating item.
    #[must_use]
    pub fn new(value: u32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    /// Returns the glyph to display for this item.
    ///
    /// For `star` scales every item renders as a star regardless of its
    /// label, filled when its value is at or below the current rating so the
    /// row reads as a cumulative fill. All other scales show the item label
    /// directly.
    #[must_use]
    pub fn glyph(&self, rating_type: RatingType, current: Option<u32>) -> String {
        match rating_type {
            RatingType::Star => {
                let active = current.is_some_and(|rating| self.value <= rating);
                if active { STAR_FILLED } else { STAR_EMPTY }.to_string()
            }
            RatingType::Emoji | RatingType::Number => self.label.clone(),
        }
    }
}

/// Derives the ordered list of selectable rating items from configuration.
///
/// Priority order:
/// 1. Explicit non-empty `items` are returned verbatim, overriding
///    type-based defaults entirely (including for `emoji`).
/// 2. `emoji` yields the fixed five-item scale with values 1-5.
/// 3. `star` and `number` yield values 1-5 with numeral labels.
///
/// The result is always non-empty.
///
/// # Examples
///
/// ```
/// use loopback::config::RatingType;
/// use loopback::models::{build_scale, RatingItem};
///
/// let scale = build_scale(RatingType::Emoji, None);
/// assert_eq!(scale.len(), 5);
/// assert_eq!(scale[0].value, 1);
///
/// let custom = vec![RatingItem::new(10, "A"), RatingItem::new(20, "B")];
/// let scale = build_scale(RatingType::Star, Some(&custom));
/// assert_eq!(scale, custom);
/// ```
#[must_use]
pub fn build_scale(rating_type: RatingType, explicit: Option<&[RatingItem]>) -> Vec<RatingItem> {
    if let Some(items) = explicit {
        if !items.is_empty() {
            return items.to_vec();
        }
    }

    match rating_type {
        RatingType::Emoji => EMOJI_GLYPHS
            .iter()
            .enumerate()
            .map(|(index, glyph)| RatingItem::new(index as u32 + 1, *glyph))
            .collect(),
        RatingType::Star | RatingType::Number => (1..=DEFAULT_SCALE_LEN)
            .map(|value| RatingItem::new(value, value.to_string()))
            .collect(),
    }
}

/// Accessible description attached to `number` rating items.
#[must_use]
pub fn accessible_label(value: u32, count: usize) -> String {
    format!("Rate {value} out of {count}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_items_override_defaults() {
        let custom = vec![RatingItem::new(10, "A"), RatingItem::new(20, "B")];

        // Explicit items win for every rating type, order preserved
        for rating_type in [RatingType::Emoji, RatingType::Star, RatingType::Number] {
            let scale = build_scale(rating_type, Some(&custom));
            assert_eq!(scale.len(), 2);
            assert_eq!(scale[0], RatingItem::new(10, "A"));
            assert_eq!(scale[1], RatingItem::new(20, "B"));
        }
    }

    #[test]
    fn test_empty_explicit_items_fall_back_to_defaults() {
        let scale = build_scale(RatingType::Emoji, Some(&[]));
        assert_eq!(scale.len(), 5);
        assert_eq!(scale[0].label, "😭");
    }

    #[test]
    fn test_emoji_default_scale() {
        let scale = build_scale(RatingType::Emoji, None);
        assert_eq!(scale.len(), 5);
        let values: Vec<u32> = scale.iter().map(|item| item.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(scale[0].label, "😭");
        assert_eq!(scale[4].label, "🤩");
    }

    #[test]
    fn test_star_and_number_default_scales() {
        for rating_type in [RatingType::Star, RatingType::Number] {
            let scale = build_scale(rating_type, None);
            assert_eq!(scale.len(), 5);
            for (index, item) in scale.iter().enumerate() {
                assert_eq!(item.value, index as u32 + 1);
                assert_eq!(item.label, (index + 1).to_string());
            }
        }
    }

    #[test]
    fn test_scale_values_at_least_one() {
        for rating_type in [RatingType::Emoji, RatingType::Star, RatingType::Number] {
            let scale = build_scale(rating_type, None);
            assert!(!scale.is_empty());
            assert!(scale.iter().all(|item| item.value >= 1));
        }
    }

    #[test]
    fn test_star_glyph_cumulative_fill() {
        let scale = build_scale(RatingType::Star, None);

        // With rating 3 selected, items 1-3 are filled and 4-5 are outlines
        let glyphs: Vec<String> = scale
            .iter()
            .map(|item| item.glyph(RatingType::Star, Some(3)))
            .collect();
        assert_eq!(glyphs, vec!["★", "★", "★", "☆", "☆"]);

        // No rating selected: all outlines
        assert!(scale
            .iter()
            .all(|item| item.glyph(RatingType::Star, None) == "☆"));
    }

    #[test]
    fn test_star_glyph_ignores_label() {
        let item = RatingItem::new(2, "custom");
        assert_eq!(item.glyph(RatingType::Star, Some(5)), "★");
    }

    #[test]
    fn test_emoji_and_number_glyphs_show_label() {
        let item = RatingItem::new(4, "😊");
        assert_eq!(item.glyph(RatingType::Emoji, Some(1)), "😊");

        let item = RatingItem::new(4, "4");
        assert_eq!(item.glyph(RatingType::Number, None), "4");
    }

    #[test]
    fn test_accessible_label() {
        assert_eq!(accessible_label(4, 5), "Rate 4 out of 5");
    }
}
