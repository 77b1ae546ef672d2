//! Color conversions between the host's normalized RGB, HSL, and hex.
//!
//! The host stores paint colors as normalized channels in `0.0..=1.0`. Editing
//! happens in HSL with hue in degrees and saturation/lightness in percent, which
//! is the form the UI presents. Conversion math runs on the 0–255 scale.
//!
//! # Precision
//!
//! [`Hsl::from_normalized`] rounds each component to two decimals. That keeps
//! an unedited component stable across an edit of its siblings: converting a
//! color to HSL and straight back lands within a fraction of one 8-bit step of
//! the original on every channel. [`Hsl::display`] applies the coarser integer
//! rounding the UI shows.
//!
//! # Example
//!
//! ```rust
//! use restyle::convert::{parse_hex, Hsl};
//!
//! let red = parse_hex("#FF0000").unwrap();
//! let hsl = Hsl::from_normalized(red);
//! assert_eq!(hsl.display(), (0, 100, 50));
//!
//! let back = hsl.to_normalized();
//! assert_eq!(back.to_hex(), "#FF0000");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

// ─── RGB types ──────────────────────────────────────────────────────────────

/// A color as the host stores it: each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl NormalizedRgb {
    /// Creates a normalized color, clamping each channel into range.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Creates a normalized color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Returns the channels on the 0–255 scale, unrounded.
    pub fn scaled(&self) -> Rgb255 {
        Rgb255 {
            r: self.r * 255.0,
            g: self.g * 255.0,
            b: self.b * 255.0,
        }
    }

    /// Formats as an uppercase `#RRGGBB` string.
    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// A color on the 0–255 scale, as sent to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb255 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

// ─── HSL math ───────────────────────────────────────────────────────────────

/// Converts 0–255 RGB channels to fractional HSL, each component in `0.0..=1.0`.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Converts fractional HSL (each in `0.0..=1.0`) to 0–255 RGB channels.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        let v = l * 255.0;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─── Hsl ────────────────────────────────────────────────────────────────────

/// A color in editing units: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Converts a host color to HSL, rounding each component to two decimals.
    pub fn from_normalized(color: NormalizedRgb) -> Self {
        let scaled = color.scaled();
        let (h, s, l) = rgb_to_hsl(scaled.r, scaled.g, scaled.b);
        Self {
            h: round2(h * 360.0),
            s: round2(s * 100.0),
            l: round2(l * 100.0),
        }
    }

    /// Converts back to a host color.
    ///
    /// Hue wraps around 360 degrees; saturation and lightness are clamped to
    /// `0..=100` so out-of-range input still yields a valid color.
    pub fn to_normalized(&self) -> NormalizedRgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;
        let (r, g, b) = hsl_to_rgb(h, s, l);
        NormalizedRgb::new(r / 255.0, g / 255.0, b / 255.0)
    }

    /// Integer-rounded `(h, s, l)` for display.
    pub fn display(&self) -> (i64, i64, i64) {
        (
            self.h.round() as i64,
            self.s.round() as i64,
            self.l.round() as i64,
        )
    }
}

// ─── Hex ────────────────────────────────────────────────────────────────────

/// Parses `#rgb`, `#rrggbb`, or either form without the `#`.
pub fn parse_hex(text: &str) -> Result<NormalizedRgb, UnitError> {
    let text = text.trim();
    let hex = text.strip_prefix('#').unwrap_or(text);
    let invalid = || UnitError::InvalidHex(hex.to_string());

    if !hex.is_ascii() {
        return Err(invalid());
    }

    match hex.len() {
        // 3-digit hex: #rgb -> #rrggbb
        3 => {
            let digit = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|d| d * 17)
                    .map_err(|_| invalid())
            };
            Ok(NormalizedRgb::from_u8(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(NormalizedRgb::from_u8(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => Err(invalid()),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Assert that normalized → HSL → normalized stays within one 8-bit step.
    fn assert_hsl_roundtrip(color: NormalizedRgb) {
        let back = Hsl::from_normalized(color).to_normalized();
        let step = 1.0 / 255.0;
        assert!(
            (color.r - back.r).abs() <= step
                && (color.g - back.g).abs() <= step
                && (color.b - back.b).abs() <= step,
            "Round-trip failed: {:?} → {:?}",
            color,
            back
        );
    }

    // =====================================================================
    // HSL conversions
    // =====================================================================

    #[test]
    fn hsl_of_primaries() {
        assert_eq!(
            Hsl::from_normalized(NormalizedRgb::from_u8(255, 0, 0)).display(),
            (0, 100, 50)
        );
        assert_eq!(
            Hsl::from_normalized(NormalizedRgb::from_u8(0, 255, 0)).display(),
            (120, 100, 50)
        );
        assert_eq!(
            Hsl::from_normalized(NormalizedRgb::from_u8(0, 0, 255)).display(),
            (240, 100, 50)
        );
    }

    #[test]
    fn hsl_of_grays_has_no_saturation() {
        let hsl = Hsl::from_normalized(NormalizedRgb::from_u8(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 50.2).abs() < 0.01);
    }

    #[test]
    fn hsl_rounds_to_two_decimals() {
        let hsl = Hsl::from_normalized(NormalizedRgb::from_u8(200, 100, 50));
        assert_eq!(hsl.h, 20.0);
        assert_eq!(hsl.s, 60.0);
        assert!((hsl.l - 49.02).abs() < 1e-9);
    }

    #[test]
    fn hue_wraps_and_saturation_clamps() {
        let wrapped = Hsl {
            h: 480.0,
            s: 100.0,
            l: 50.0,
        };
        assert_eq!(wrapped.to_normalized().to_hex(), "#00FF00");

        let clamped = Hsl {
            h: 0.0,
            s: 150.0,
            l: 50.0,
        };
        assert_eq!(clamped.to_normalized().to_hex(), "#FF0000");
    }

    #[test]
    fn roundtrip_black_white() {
        assert_hsl_roundtrip(NormalizedRgb::from_u8(0, 0, 0));
        assert_hsl_roundtrip(NormalizedRgb::from_u8(255, 255, 255));
    }

    #[test]
    fn roundtrip_arbitrary_color() {
        assert_hsl_roundtrip(NormalizedRgb::from_u8(200, 100, 50));
        assert_hsl_roundtrip(NormalizedRgb::from_u8(17, 201, 133));
    }

    proptest! {
        #[test]
        fn roundtrip_every_8bit_color(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            assert_hsl_roundtrip(NormalizedRgb::from_u8(r, g, b));
        }

        #[test]
        fn roundtrip_fractional_channels(r in 0.0f64..=1.0, g in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            assert_hsl_roundtrip(NormalizedRgb::new(r, g, b));
        }
    }

    // =====================================================================
    // Hex
    // =====================================================================

    #[test]
    fn parse_hex_six_digits() {
        let c = parse_hex("#FF0000").unwrap();
        assert_eq!(c, NormalizedRgb::new(1.0, 0.0, 0.0));
        assert_eq!(parse_hex("00ff00").unwrap(), NormalizedRgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn parse_hex_three_digits() {
        assert_eq!(parse_hex("#fff").unwrap(), NormalizedRgb::new(1.0, 1.0, 1.0));
        assert_eq!(parse_hex(" #00F ").unwrap().to_hex(), "#0000FF");
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert!(matches!(parse_hex("#ff00"), Err(UnitError::InvalidHex(_))));
        assert!(parse_hex("#gg0000").is_err());
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn to_hex_rounds_channels() {
        assert_eq!(NormalizedRgb::new(0.5, 0.5, 0.5).to_hex(), "#808080");
        assert_eq!(NormalizedRgb::from_u8(18, 52, 86).to_hex(), "#123456");
    }

    #[test]
    fn scaled_is_unrounded() {
        let scaled = NormalizedRgb::new(0.5, 1.0, 0.0).scaled();
        assert_eq!(scaled.r, 127.5);
        assert_eq!(scaled.g, 255.0);
        assert_eq!(scaled.b, 0.0);
    }
}
