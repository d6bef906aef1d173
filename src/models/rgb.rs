//! RGB color handling with hex parsing and lightness adjustment.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Allow float comparisons in HSV conversion (standard algorithms)
#![allow(clippy::float_cmp)]

use anyhow::{Context, Result};
use std::fmt;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Theme overrides supply colors as hex strings; this type parses them and
/// provides the lightness adjustments used for derived dark-mode tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use loopback::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("00FF00").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use loopback::models::RgbColor;
    ///
    /// let color = RgbColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "#FF0000");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Returns a lightened version of the color.
    ///
    /// Increases the HSV value channel by `percent` points (of full
    /// brightness), clamped at maximum. Used for hover-state tokens derived
    /// from an accent color.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopback::models::RgbColor;
    ///
    /// let base = RgbColor::new(2, 6, 23);
    /// let lighter = base.lighten(5);
    /// assert!(lighter.r >= base.r && lighter.g >= base.g && lighter.b >= base.b);
    /// ```
    #[must_use]
    pub fn lighten(&self, percent: u8) -> Self {
        let (h, s, v) = self.to_hsv();
        let new_v = (v + f32::from(percent) / 100.0).min(1.0);
        Self::from_hsv(h, s, new_v)
    }

    /// Returns a darkened version of the color.
    ///
    /// Scales the HSV value channel down by `percent`. Used for
    /// selected-state and focus-ring tokens derived from a primary color.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopback::models::RgbColor;
    ///
    /// let white = RgbColor::new(255, 255, 255);
    /// assert_eq!(white.darken(20), RgbColor::new(204, 204, 204));
    /// ```
    #[must_use]
    pub fn darken(&self, percent: u8) -> Self {
        let percent = percent.min(100);
        let (h, s, v) = self.to_hsv();
        let new_v = v * (1.0 - f32::from(percent) / 100.0);
        Self::from_hsv(h, s, new_v)
    }

    /// Converts the RGB color to HSV (Hue, Saturation, Value) color space.
    ///
    /// Returns a tuple `(h, s, v)` with hue in 0.0-360.0 degrees (0.0 for
    /// grayscale) and saturation/value in 0.0-1.0.
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HSV color model uses single-char names
    pub fn to_hsv(&self) -> (f32, f32, f32) {
        let r = f32::from(self.r) / 255.0;
        let g = f32::from(self.g) / 255.0;
        let b = f32::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        // Value is the maximum of RGB
        let v = max;

        // Saturation
        let s = if max == 0.0 { 0.0 } else { delta / max };

        // Hue
        let h = if delta == 0.0 {
            0.0 // Grayscale, hue is undefined
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // Normalize hue to 0-360 range
        let h = if h < 0.0 { h + 360.0 } else { h };

        (h, s, v)
    }

    /// Creates an `RgbColor` from HSV (Hue, Saturation, Value) color space.
    ///
    /// Out-of-range inputs are clamped.
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HSV color model uses single-char names
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        // Clamp inputs
        let h = h.clamp(0.0, 360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let c = v * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = if h_prime < 1.0 {
            (c, x, 0.0)
        } else if h_prime < 2.0 {
            (x, c, 0.0)
        } else if h_prime < 3.0 {
            (0.0, c, x)
        } else if h_prime < 4.0 {
            (0.0, x, c)
        } else if h_prime < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self {
            r: ((r + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            g: ((g + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            b: ((b + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  #FFFFFF  ").unwrap();
        assert_eq!(color, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
    }

    #[test]
    fn test_to_hex() {
        let color = RgbColor::new(255, 0, 0);
        assert_eq!(color.to_hex(), "#FF0000");

        let color = RgbColor::new(0, 128, 255);
        assert_eq!(color.to_hex(), "#0080FF");
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = RgbColor::new(123, 45, 67);
        let hex = original.to_hex();
        let parsed = RgbColor::from_hex(&hex).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_lighten_brightens() {
        let base = RgbColor::new(55, 65, 81);
        let lighter = base.lighten(5);
        let (_, _, v_base) = base.to_hsv();
        let (_, _, v_light) = lighter.to_hsv();
        assert!(v_light > v_base);
    }

    #[test]
    fn test_lighten_clamps_at_white() {
        let white = RgbColor::new(255, 255, 255);
        assert_eq!(white.lighten(5), white);
        assert_eq!(white.lighten(100), white);
    }

    #[test]
    fn test_darken_dims() {
        let base = RgbColor::new(59, 130, 246);
        let darker = base.darken(20);
        let (_, _, v_base) = base.to_hsv();
        let (_, _, v_dark) = darker.to_hsv();
        assert!(v_dark < v_base);
    }

    #[test]
    fn test_darken_edge_cases() {
        let black = RgbColor::new(0, 0, 0);
        assert_eq!(black.darken(20), black);

        let color = RgbColor::new(100, 150, 200);
        assert_eq!(color.darken(100), RgbColor::new(0, 0, 0));
        // Values above 100 clamp to full darkening
        assert_eq!(color.darken(200), RgbColor::new(0, 0, 0));
    }

    #[test]
    fn test_hsv_roundtrip() {
        let colors = vec![
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 255, 0),
            RgbColor::new(0, 0, 255),
            RgbColor::new(2, 6, 23),
            RgbColor::new(229, 231, 235),
        ];

        for color in colors {
            let (h, s, v) = color.to_hsv();
            let converted = RgbColor::from_hsv(h, s, v);
            assert!(
                (i16::from(color.r) - i16::from(converted.r)).abs() <= 1,
                "Red channel mismatch: {} vs {}",
                color.r,
                converted.r
            );
            assert!(
                (i16::from(color.g) - i16::from(converted.g)).abs() <= 1,
                "Green channel mismatch: {} vs {}",
                color.g,
                converted.g
            );
            assert!(
                (i16::from(color.b) - i16::from(converted.b)).abs() <= 1,
                "Blue channel mismatch: {} vs {}",
                color.b,
                converted.b
            );
        }
    }
}
