//! Design-token derivation from partial theme overrides.
//!
//! This module maps a [`ThemeInput`] override into a complete named token
//! set. Explicit values always win; `dark_mode` fills a derived dark palette
//! for tokens not explicitly set; tokens with no value from either source
//! are omitted entirely, never emitted as empty placeholders.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::ThemeInput;
use crate::models::RgbColor;

// Dark palette defaults.
const DARK_BACKGROUND: RgbColor = RgbColor::new(2, 6, 23); // #020617
const DARK_TEXT: RgbColor = RgbColor::new(229, 231, 235); // #E5E7EB
const DARK_TEXT_SECONDARY: RgbColor = RgbColor::new(156, 163, 175); // #9CA3AF
const DARK_BORDER: RgbColor = RgbColor::new(31, 41, 55); // #1F2937
const DARK_ACCENT_BACKGROUND: RgbColor = DARK_BACKGROUND;
const DARK_INPUT_BACKGROUND: RgbColor = DARK_BACKGROUND;

// Used when dark mode is requested without a primary color, so the
// selected/focus tokens still resolve.
const DARK_ACCENT_SELECTED_FALLBACK: RgbColor = RgbColor::new(30, 58, 138); // #1E3A8A
const DARK_FOCUS_RING_FALLBACK: RgbColor = RgbColor::new(30, 64, 175); // #1E40AF

/// Lightness boost applied to the accent background for the hover token.
const ACCENT_HOVER_LIGHTEN_PERCENT: u8 = 5;

/// Darkening applied to the primary color for selected/focus tokens.
const PRIMARY_DARKEN_PERCENT: u8 = 20;

/// Fixed token names the styling layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenName {
    /// Primary color for titles and emphasis.
    Primary,
    /// Card background.
    Background,
    /// Primary text.
    Text,
    /// Secondary text (subtitles, hints).
    TextSecondary,
    /// Rating item background.
    AccentBackground,
    /// Rating item hover/highlight background.
    AccentHover,
    /// Selected rating item background.
    AccentSelected,
    /// Border color.
    Border,
    /// Free-text field background.
    InputBackground,
    /// Focus indicator color.
    FocusRing,
    /// Font family, for embedders that can use it.
    FontFamily,
    /// Stacking order, for embedders that can use it.
    ZIndex,
}

impl TokenName {
    /// Stable custom-property name for this token.
    #[must_use]
    pub const fn css_name(&self) -> &'static str {
        match self {
            Self::Primary => "--lb-primary",
            Self::Background => "--lb-bg",
            Self::Text => "--lb-text",
            Self::TextSecondary => "--lb-text-secondary",
            Self::AccentBackground => "--lb-accent-bg",
            Self::AccentHover => "--lb-accent-hover",
            Self::AccentSelected => "--lb-accent-selected",
            Self::Border => "--lb-border",
            Self::InputBackground => "--lb-input-bg",
            Self::FocusRing => "--lb-focus-ring",
            Self::FontFamily => "--lb-font-family",
            Self::ZIndex => "--lb-z-index",
        }
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_name())
    }
}

/// A resolved token value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// A concrete color.
    Color(RgbColor),
    /// A free-form text value (font family).
    Text(String),
    /// A numeric value (z-index).
    Number(i64),
}

impl TokenValue {
    /// Returns the color if this token holds one.
    #[must_use]
    pub const fn as_color(&self) -> Option<RgbColor> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Text(_) | Self::Number(_) => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "{color}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// A fully-resolved design-token set.
///
/// Every key present in the map has a concrete value; unresolvable tokens
/// are absent rather than empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeTokens {
    tokens: BTreeMap<TokenName, TokenValue>,
}

impl ThemeTokens {
    /// Looks up a token value.
    #[must_use]
    pub fn get(&self, name: TokenName) -> Option<&TokenValue> {
        self.tokens.get(&name)
    }

    /// Looks up a token as a terminal color.
    #[must_use]
    pub fn color(&self, name: TokenName) -> Option<ratatui::style::Color> {
        self.tokens
            .get(&name)
            .and_then(TokenValue::as_color)
            .map(|color| color.to_ratatui_color())
    }

    /// Whether a token is present.
    #[must_use]
    pub fn contains(&self, name: TokenName) -> bool {
        self.tokens.contains_key(&name)
    }

    /// Number of resolved tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over resolved tokens in name order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenName, &TokenValue)> {
        self.tokens.iter().map(|(name, value)| (*name, value))
    }

    /// Renders the token set as CSS custom-property declarations, one per
    /// line, for embedders that style with an external stylesheet.
    #[must_use]
    pub fn css_declarations(&self) -> String {
        self.tokens
            .iter()
            .map(|(name, value)| format!("{}: {};\n", name.css_name(), value))
            .collect()
    }
}

/// Derives the complete token set from a partial theme override.
///
/// Explicitly supplied fields are copied one-to-one into their tokens. When
/// `dark_mode` is set, unset tokens receive the dark palette; the hover and
/// selected/focus tokens are expressed as lightness adjustments of the
/// resolved accent/primary colors so they stay consistent with host
/// overrides.
///
/// # Examples
///
/// ```
/// use loopback::config::ThemeInput;
/// use loopback::theme::{derive_tokens, TokenName};
///
/// let mut input = ThemeInput::default();
/// input.primary_color = Some("#3B82F6".to_string());
/// let tokens = derive_tokens(&input);
/// assert!(tokens.contains(TokenName::Primary));
/// assert!(!tokens.contains(TokenName::Background));
/// ```
#[must_use]
pub fn derive_tokens(input: &ThemeInput) -> ThemeTokens {
    let mut tokens = BTreeMap::new();

    let parse = |value: &Option<String>| {
        value
            .as_deref()
            .and_then(|hex| RgbColor::from_hex(hex).ok())
    };

    let primary = parse(&input.primary_color);

    // Explicit fields, one-to-one.
    let explicit = [
        (TokenName::Primary, primary),
        (TokenName::Background, parse(&input.background_color)),
        (TokenName::Text, parse(&input.text_color)),
        (TokenName::AccentBackground, parse(&input.accent_color)),
        (TokenName::Border, parse(&input.border_color)),
    ];
    for (name, color) in explicit {
        if let Some(color) = color {
            tokens.insert(name, TokenValue::Color(color));
        }
    }
    if let Some(font_family) = &input.font_family {
        tokens.insert(TokenName::FontFamily, TokenValue::Text(font_family.clone()));
    }
    if let Some(z_index) = input.z_index {
        tokens.insert(TokenName::ZIndex, TokenValue::Number(z_index));
    }

    // Dark palette for tokens not already set; explicit values always win.
    if input.is_dark() {
        let dark_defaults = [
            (TokenName::Background, DARK_BACKGROUND),
            (TokenName::Text, DARK_TEXT),
            (TokenName::TextSecondary, DARK_TEXT_SECONDARY),
            (TokenName::Border, DARK_BORDER),
            (TokenName::AccentBackground, DARK_ACCENT_BACKGROUND),
            (TokenName::InputBackground, DARK_INPUT_BACKGROUND),
        ];
        for (name, color) in dark_defaults {
            if let Entry::Vacant(entry) = tokens.entry(name) {
                entry.insert(TokenValue::Color(color));
            }
        }

        let accent = tokens
            .get(&TokenName::AccentBackground)
            .and_then(TokenValue::as_color)
            .unwrap_or(DARK_ACCENT_BACKGROUND);
        tokens.insert(
            TokenName::AccentHover,
            TokenValue::Color(accent.lighten(ACCENT_HOVER_LIGHTEN_PERCENT)),
        );

        let (selected, ring) = primary.map_or(
            (DARK_ACCENT_SELECTED_FALLBACK, DARK_FOCUS_RING_FALLBACK),
            |primary| {
                let adjusted = primary.darken(PRIMARY_DARKEN_PERCENT);
                (adjusted, adjusted)
            },
        );
        tokens.insert(TokenName::AccentSelected, TokenValue::Color(selected));
        tokens.insert(TokenName::FocusRing, TokenValue::Color(ring));
    }

    ThemeTokens { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ThemeInput {
        ThemeInput::default()
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let tokens = derive_tokens(&input());
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_explicit_fields_map_one_to_one() {
        let mut theme = input();
        theme.primary_color = Some("#3B82F6".to_string());
        theme.background_color = Some("#FFFFFF".to_string());
        theme.font_family = Some("Inter".to_string());
        theme.z_index = Some(9999);

        let tokens = derive_tokens(&theme);
        assert_eq!(tokens.len(), 4);
        assert_eq!(
            tokens.get(TokenName::Primary),
            Some(&TokenValue::Color(RgbColor::new(59, 130, 246)))
        );
        assert_eq!(
            tokens.get(TokenName::Background),
            Some(&TokenValue::Color(RgbColor::new(255, 255, 255)))
        );
        assert_eq!(
            tokens.get(TokenName::FontFamily),
            Some(&TokenValue::Text("Inter".to_string()))
        );
        assert_eq!(tokens.get(TokenName::ZIndex), Some(&TokenValue::Number(9999)));
        // Dark-only tokens stay absent without dark mode
        assert!(!tokens.contains(TokenName::AccentHover));
        assert!(!tokens.contains(TokenName::FocusRing));
    }

    #[test]
    fn test_dark_mode_fills_unset_tokens() {
        let mut theme = input();
        theme.dark_mode = Some(true);

        let tokens = derive_tokens(&theme);
        assert_eq!(
            tokens.get(TokenName::Background),
            Some(&TokenValue::Color(DARK_BACKGROUND))
        );
        assert_eq!(
            tokens.get(TokenName::Text),
            Some(&TokenValue::Color(DARK_TEXT))
        );
        assert_eq!(
            tokens.get(TokenName::TextSecondary),
            Some(&TokenValue::Color(DARK_TEXT_SECONDARY))
        );
        assert_eq!(
            tokens.get(TokenName::Border),
            Some(&TokenValue::Color(DARK_BORDER))
        );
        assert_eq!(
            tokens.get(TokenName::InputBackground),
            Some(&TokenValue::Color(DARK_INPUT_BACKGROUND))
        );
    }

    #[test]
    fn test_explicit_values_win_over_dark_defaults() {
        let mut theme = input();
        theme.dark_mode = Some(true);
        theme.background_color = Some("#123456".to_string());
        theme.text_color = Some("#ABCDEF".to_string());

        let tokens = derive_tokens(&theme);
        assert_eq!(
            tokens.get(TokenName::Background),
            Some(&TokenValue::Color(RgbColor::new(0x12, 0x34, 0x56)))
        );
        assert_eq!(
            tokens.get(TokenName::Text),
            Some(&TokenValue::Color(RgbColor::new(0xAB, 0xCD, 0xEF)))
        );
        // Unset fields still receive dark defaults
        assert_eq!(
            tokens.get(TokenName::Border),
            Some(&TokenValue::Color(DARK_BORDER))
        );
    }

    #[test]
    fn test_accent_hover_derived_from_resolved_accent() {
        let mut theme = input();
        theme.dark_mode = Some(true);
        theme.accent_color = Some("#374151".to_string());

        let tokens = derive_tokens(&theme);
        let accent = RgbColor::new(0x37, 0x41, 0x51);
        assert_eq!(
            tokens.get(TokenName::AccentHover),
            Some(&TokenValue::Color(accent.lighten(ACCENT_HOVER_LIGHTEN_PERCENT)))
        );
    }

    #[test]
    fn test_selected_and_focus_derived_from_primary() {
        let mut theme = input();
        theme.dark_mode = Some(true);
        theme.primary_color = Some("#3B82F6".to_string());

        let tokens = derive_tokens(&theme);
        let expected = RgbColor::new(59, 130, 246).darken(PRIMARY_DARKEN_PERCENT);
        assert_eq!(
            tokens.get(TokenName::AccentSelected),
            Some(&TokenValue::Color(expected))
        );
        assert_eq!(
            tokens.get(TokenName::FocusRing),
            Some(&TokenValue::Color(expected))
        );
    }

    #[test]
    fn test_selected_and_focus_fallbacks_without_primary() {
        let mut theme = input();
        theme.dark_mode = Some(true);

        let tokens = derive_tokens(&theme);
        assert_eq!(
            tokens.get(TokenName::AccentSelected),
            Some(&TokenValue::Color(DARK_ACCENT_SELECTED_FALLBACK))
        );
        assert_eq!(
            tokens.get(TokenName::FocusRing),
            Some(&TokenValue::Color(DARK_FOCUS_RING_FALLBACK))
        );
    }

    #[test]
    fn test_map_is_total_for_all_inputs() {
        // Every present key must hold a concrete value; sample a few inputs
        let mut variants = vec![input()];
        let mut dark = input();
        dark.dark_mode = Some(true);
        variants.push(dark);
        let mut mixed = input();
        mixed.dark_mode = Some(true);
        mixed.primary_color = Some("#FF0000".to_string());
        mixed.z_index = Some(10);
        variants.push(mixed);

        for theme in variants {
            let tokens = derive_tokens(&theme);
            for (name, value) in tokens.iter() {
                match value {
                    TokenValue::Text(text) => {
                        assert!(!text.is_empty(), "{name} resolved to empty text")
                    }
                    TokenValue::Color(_) | TokenValue::Number(_) => {}
                }
            }
        }
    }

    #[test]
    fn test_css_declarations() {
        let mut theme = input();
        theme.primary_color = Some("#FF0000".to_string());
        let tokens = derive_tokens(&theme);
        assert_eq!(tokens.css_declarations(), "--lb-primary: #FF0000;\n");
    }

    #[test]
    fn test_token_css_names() {
        assert_eq!(TokenName::AccentBackground.css_name(), "--lb-accent-bg");
        assert_eq!(TokenName::InputBackground.css_name(), "--lb-input-bg");
        assert_eq!(TokenName::TextSecondary.css_name(), "--lb-text-secondary");
    }
}
