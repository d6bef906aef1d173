//! Widget configuration surface.
//!
//! Configuration is immutable per mount and supplied by the host, either
//! constructed directly or loaded from a TOML/JSON file. Missing optional
//! fields resolve to documented defaults and are never errors.

use anyhow::{Context, Result};
use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{
    DEFAULT_LABEL_HIGH, DEFAULT_LABEL_LOW, DEFAULT_LABEL_SUBMIT, DEFAULT_LABEL_TEXTAREA,
    DEFAULT_PLACEHOLDER, DEFAULT_SUBTITLE, DEFAULT_TITLE,
};
use crate::models::{RatingItem, RgbColor};

/// Presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Inline card with no overlay or trigger machinery and no visibility gating.
    Embedded,
    /// Floating trigger and/or card that can be shown or hidden.
    #[default]
    Modal,
}

/// Overlay anchor position. Ignored for the embedded variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Anchored to the bottom-right corner of the frame.
    #[default]
    BottomRight,
    /// Anchored to the bottom-left corner of the frame.
    BottomLeft,
    /// Centered in the frame.
    Center,
}

/// Rating scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RatingType {
    /// Five emoji faces, crying through ecstatic.
    #[default]
    Emoji,
    /// Cumulative star fill.
    Star,
    /// Plain numerals.
    Number,
}

/// Partial theme override.
///
/// All fields are optional; absence means "inherit from the host terminal
/// or from dark-mode defaults". Colors are hex strings ("#RRGGBB").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThemeInput {
    /// Primary color for titles and emphasis.
    pub primary_color: Option<String>,
    /// Card background color.
    pub background_color: Option<String>,
    /// Primary text color.
    pub text_color: Option<String>,
    /// Accent background color for rating items.
    pub accent_color: Option<String>,
    /// Border color.
    pub border_color: Option<String>,
    /// Border radius; values above zero select rounded borders.
    pub border_radius: Option<u16>,
    /// Font family, exported as a token for embedders that can use it.
    pub font_family: Option<String>,
    /// Requests the derived dark palette for unset tokens.
    pub dark_mode: Option<bool>,
    /// Stacking order when used alongside other overlays.
    pub z_index: Option<i64>,
}

impl ThemeInput {
    /// Whether the derived dark palette applies.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark_mode == Some(true)
    }
}

/// Content string overrides for the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContentOverride {
    /// Card header title.
    pub title: Option<String>,
    /// Card header subtitle.
    pub subtitle: Option<String>,
    /// Free-text field placeholder.
    pub placeholder: Option<String>,
    /// Label under the lowest rating item.
    pub label_low: Option<String>,
    /// Label under the highest rating item.
    pub label_high: Option<String>,
    /// Label above the free-text field.
    pub label_textarea: Option<String>,
    /// Submit button label.
    pub label_submit: Option<String>,
}

impl ContentOverride {
    /// Resolved header title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Resolved header subtitle.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }

    /// Resolved free-text placeholder.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    /// Resolved low-end scale label.
    #[must_use]
    pub fn label_low(&self) -> &str {
        self.label_low.as_deref().unwrap_or(DEFAULT_LABEL_LOW)
    }

    /// Resolved high-end scale label.
    #[must_use]
    pub fn label_high(&self) -> &str {
        self.label_high.as_deref().unwrap_or(DEFAULT_LABEL_HIGH)
    }

    /// Resolved free-text field label.
    #[must_use]
    pub fn label_textarea(&self) -> &str {
        self.label_textarea.as_deref().unwrap_or(DEFAULT_LABEL_TEXTAREA)
    }

    /// Resolved submit button label.
    #[must_use]
    pub fn label_submit(&self) -> &str {
        self.label_submit.as_deref().unwrap_or(DEFAULT_LABEL_SUBMIT)
    }
}

/// Style override hook for one widget element.
///
/// Opaque to the core; applied unchanged on top of the token-derived style
/// by the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleSpec {
    /// Foreground color override (hex).
    pub fg: Option<String>,
    /// Background color override (hex).
    pub bg: Option<String>,
    /// Bold modifier.
    pub bold: Option<bool>,
}

impl StyleSpec {
    /// Applies this override on top of a base style.
    #[must_use]
    pub fn apply(&self, mut style: Style) -> Style {
        if let Some(fg) = self.fg.as_deref().and_then(|hex| RgbColor::from_hex(hex).ok()) {
            style = style.fg(fg.to_ratatui_color());
        }
        if let Some(bg) = self.bg.as_deref().and_then(|hex| RgbColor::from_hex(hex).ok()) {
            style = style.bg(bg.to_ratatui_color());
        }
        if self.bold == Some(true) {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// Style override hooks for the widget's interactive elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleOverrides {
    /// Card body override.
    pub card: StyleSpec,
    /// Floating trigger button override.
    pub trigger: StyleSpec,
    /// Submit button override.
    pub submit: StyleSpec,
    /// Rating item override.
    pub rating: StyleSpec,
}

/// Per-mount widget configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Opaque identifier for the feedback channel. Required.
    pub source_id: String,
    /// Presentation variant.
    #[serde(default)]
    pub variant: Variant,
    /// Overlay anchor position.
    #[serde(default)]
    pub position: Position,
    /// Rating scale type.
    #[serde(default)]
    pub rating_type: RatingType,
    /// Custom rating scale overriding the type-based default.
    #[serde(default)]
    pub rating_items: Option<Vec<RatingItem>>,
    /// External visibility value. Presence selects controlled mode.
    #[serde(default)]
    pub is_open: Option<bool>,
    /// Initial open state when uncontrolled.
    #[serde(default)]
    pub default_open: bool,
    /// Show the floating trigger for the uncontrolled modal variant.
    #[serde(default = "default_show_trigger")]
    pub show_trigger: bool,
    /// Theme override.
    #[serde(default)]
    pub theme: ThemeInput,
    /// Content string overrides.
    #[serde(default)]
    pub content: ContentOverride,
    /// Style override hooks, passed through to the render layer.
    #[serde(default)]
    pub styles: StyleOverrides,
}

fn default_show_trigger() -> bool {
    true
}

impl WidgetConfig {
    /// Creates a configuration with all defaults for the given channel.
    #[must_use]
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            variant: Variant::default(),
            position: Position::default(),
            rating_type: RatingType::default(),
            rating_items: None,
            is_open: None,
            default_open: false,
            show_trigger: true,
            theme: ThemeInput::default(),
            content: ContentOverride::default(),
            styles: StyleOverrides::default(),
        }
    }

    /// Whether visibility is dictated by a host-supplied value.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.is_open.is_some()
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("Failed to parse widget config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(contents).context("Failed to parse widget config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, dispatching on the file extension
    /// (`.json` parses as JSON, anything else as TOML).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Validates the configuration.
    ///
    /// Missing optional fields are fine; this only rejects values that can
    /// never be rendered: an empty source id, rating items below 1, and
    /// unparseable color strings.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.source_id.trim().is_empty() {
            anyhow::bail!("source_id must not be empty");
        }

        if let Some(items) = &self.rating_items {
            for item in items {
                if item.value < 1 {
                    anyhow::bail!(
                        "Rating item '{}' has value {}; values must be >= 1",
                        item.label,
                        item.value
                    );
                }
            }
        }

        let colors = [
            ("primary_color", &self.theme.primary_color),
            ("background_color", &self.theme.background_color),
            ("text_color", &self.theme.text_color),
            ("accent_color", &self.theme.accent_color),
            ("border_color", &self.theme.border_color),
        ];
        for (name, value) in colors {
            if let Some(hex) = value {
                RgbColor::from_hex(hex).with_context(|| format!("Invalid theme.{name}"))?;
            }
        }

        Ok(())
    }
}
