//! Pure numeric conversions between UI display forms and host representations.
//!
//! - [`color`]: normalized RGB ↔ HSL ↔ hex
//! - [`units`]: line height and letter spacing text ↔ `{unit, value}`

pub mod color;
pub mod units;

pub use color::{hsl_to_rgb, parse_hex, rgb_to_hsl, Hsl, NormalizedRgb, Rgb255};
pub use units::{format_number, LetterSpacing, LineHeight};
pub(crate) use units::parse_number;
