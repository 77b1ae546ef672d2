//! Length units for line height and letter spacing.
//!
//! The UI shows lengths as plain text: `"150%"`, `"24"`, or `"AUTO"`. The host
//! stores them as a `{unit, value}` pair. [`LineHeight::parse`] and
//! [`LetterSpacing::parse`] go from text to the host form. [`fmt::Display`]
//! goes back, rounding the value to two decimals.
//!
//! Text that is neither `AUTO` nor `%`-suffixed is parsed as a pixel value.
//! A failed parse is an error rather than a silent zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Host unit tag as it appears on the wire.
///
/// `FIXED` is accepted as an alias for `PIXELS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum LengthUnit {
    Auto,
    #[serde(alias = "FIXED")]
    Pixels,
    Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLength {
    unit: LengthUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

/// Line height of a text style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLength", into = "RawLength")]
pub enum LineHeight {
    Auto,
    Pixels(f64),
    Percent(f64),
}

/// Letter spacing of a text style. There is no `AUTO` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLength", into = "RawLength")]
pub enum LetterSpacing {
    Pixels(f64),
    Percent(f64),
}

impl LineHeight {
    /// Parses the displayed form: `"AUTO"`, `"150%"`, or `"24"`.
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Ok(LineHeight::Auto);
        }
        Ok(match parse_numeric(text)? {
            Numeric::Percent(v) => LineHeight::Percent(v),
            Numeric::Pixels(v) => LineHeight::Pixels(v),
        })
    }
}

impl LetterSpacing {
    /// Parses the displayed form: `"2%"` or `"0.5"`.
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        Ok(match parse_numeric(text.trim())? {
            Numeric::Percent(v) => LetterSpacing::Percent(v),
            Numeric::Pixels(v) => LetterSpacing::Pixels(v),
        })
    }
}

impl fmt::Display for LineHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineHeight::Auto => write!(f, "AUTO"),
            LineHeight::Pixels(v) => write!(f, "{}", format_number(*v)),
            LineHeight::Percent(v) => write!(f, "{}%", format_number(*v)),
        }
    }
}

impl fmt::Display for LetterSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LetterSpacing::Pixels(v) => write!(f, "{}", format_number(*v)),
            LetterSpacing::Percent(v) => write!(f, "{}%", format_number(*v)),
        }
    }
}

enum Numeric {
    Pixels(f64),
    Percent(f64),
}

fn parse_numeric(text: &str) -> Result<Numeric, UnitError> {
    if let Some(number) = text.strip_suffix('%') {
        return parse_number(number).map(Numeric::Percent);
    }
    let number = text
        .strip_suffix("px")
        .or_else(|| text.strip_suffix("PX"))
        .unwrap_or(text);
    parse_number(number).map(Numeric::Pixels)
}

pub(crate) fn parse_number(text: &str) -> Result<f64, UnitError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(UnitError::InvalidNumber(text.to_string())),
    }
}

/// Rounds to two decimals and formats without trailing zeros (`24`, `1.5`).
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0" after rounding a small negative value.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

impl TryFrom<RawLength> for LineHeight {
    type Error = UnitError;

    fn try_from(raw: RawLength) -> Result<Self, Self::Error> {
        match (raw.unit, raw.value) {
            (LengthUnit::Auto, _) => Ok(LineHeight::Auto),
            (LengthUnit::Pixels, Some(v)) => Ok(LineHeight::Pixels(v)),
            (LengthUnit::Percent, Some(v)) => Ok(LineHeight::Percent(v)),
            (_, None) => Err(UnitError::MissingValue("line height")),
        }
    }
}

impl From<LineHeight> for RawLength {
    fn from(value: LineHeight) -> Self {
        match value {
            LineHeight::Auto => RawLength {
                unit: LengthUnit::Auto,
                value: None,
            },
            LineHeight::Pixels(v) => RawLength {
                unit: LengthUnit::Pixels,
                value: Some(v),
            },
            LineHeight::Percent(v) => RawLength {
                unit: LengthUnit::Percent,
                value: Some(v),
            },
        }
    }
}

impl TryFrom<RawLength> for LetterSpacing {
    type Error = UnitError;

    fn try_from(raw: RawLength) -> Result<Self, Self::Error> {
        match (raw.unit, raw.value) {
            (LengthUnit::Auto, _) => Err(UnitError::AutoNotAllowed),
            (LengthUnit::Pixels, Some(v)) => Ok(LetterSpacing::Pixels(v)),
            (LengthUnit::Percent, Some(v)) => Ok(LetterSpacing::Percent(v)),
            (_, None) => Err(UnitError::MissingValue("letter spacing")),
        }
    }
}

impl From<LetterSpacing> for RawLength {
    fn from(value: LetterSpacing) -> Self {
        match value {
            LetterSpacing::Pixels(v) => RawLength {
                unit: LengthUnit::Pixels,
                value: Some(v),
            },
            LetterSpacing::Percent(v) => RawLength {
                unit: LengthUnit::Percent,
                value: Some(v),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_line_height_forms() {
        assert_eq!(LineHeight::parse("150%").unwrap(), LineHeight::Percent(150.0));
        assert_eq!(LineHeight::parse("24").unwrap(), LineHeight::Pixels(24.0));
        assert_eq!(LineHeight::parse(" 24px ").unwrap(), LineHeight::Pixels(24.0));
        assert_eq!(LineHeight::parse("AUTO").unwrap(), LineHeight::Auto);
        assert_eq!(LineHeight::parse("auto").unwrap(), LineHeight::Auto);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            LineHeight::parse("tall"),
            Err(UnitError::InvalidNumber("tall".into()))
        );
        assert!(LineHeight::parse("%").is_err());
        assert!(LineHeight::parse("").is_err());
        assert!(LineHeight::parse("inf").is_err());
    }

    #[test]
    fn test_letter_spacing_has_no_auto() {
        assert_eq!(LetterSpacing::parse("2%").unwrap(), LetterSpacing::Percent(2.0));
        assert_eq!(LetterSpacing::parse("-0.5").unwrap(), LetterSpacing::Pixels(-0.5));
        assert!(LetterSpacing::parse("AUTO").is_err());
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        assert_eq!(LineHeight::Percent(150.0).to_string(), "150%");
        assert_eq!(LineHeight::Pixels(24.0).to_string(), "24");
        assert_eq!(LineHeight::Pixels(23.456).to_string(), "23.46");
        assert_eq!(LineHeight::Auto.to_string(), "AUTO");
        assert_eq!(LetterSpacing::Percent(-1.234).to_string(), "-1.23%");
        assert_eq!(LetterSpacing::Pixels(-0.001).to_string(), "0");
    }

    #[test]
    fn test_percent_display_round_trip() {
        let original = LineHeight::Percent(150.0);
        assert_eq!(LineHeight::parse(&original.to_string()).unwrap(), original);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(LineHeight::Percent(150.0)).unwrap();
        assert_eq!(json, json!({"unit": "PERCENT", "value": 150.0}));

        let json = serde_json::to_value(LineHeight::Auto).unwrap();
        assert_eq!(json, json!({"unit": "AUTO"}));

        let fixed: LineHeight = serde_json::from_value(json!({"unit": "FIXED", "value": 20})).unwrap();
        assert_eq!(fixed, LineHeight::Pixels(20.0));

        let err = serde_json::from_value::<LetterSpacing>(json!({"unit": "AUTO"}));
        assert!(err.is_err());

        let err = serde_json::from_value::<LineHeight>(json!({"unit": "PIXELS"}));
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn line_height_survives_display(value in -1000.0f64..1000.0, percent in any::<bool>()) {
            let original = if percent { LineHeight::Percent(value) } else { LineHeight::Pixels(value) };
            let back = LineHeight::parse(&original.to_string()).unwrap();
            match (original, back) {
                (LineHeight::Percent(a), LineHeight::Percent(b)) | (LineHeight::Pixels(a), LineHeight::Pixels(b)) => {
                    prop_assert!((a - b).abs() <= 0.005 + 1e-9);
                }
                other => prop_assert!(false, "unit changed: {:?}", other),
            }
        }

        #[test]
        fn letter_spacing_survives_display(value in -100.0f64..100.0, percent in any::<bool>()) {
            let original = if percent { LetterSpacing::Percent(value) } else { LetterSpacing::Pixels(value) };
            let back = LetterSpacing::parse(&original.to_string()).unwrap();
            prop_assert_eq!(std::mem::discriminant(&original), std::mem::discriminant(&back));
        }
    }
}
