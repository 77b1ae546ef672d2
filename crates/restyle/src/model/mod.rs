//! Style, paint, and variable records as exchanged with the document host.
//!
//! All records here are owned by host storage. The core only reads snapshots of
//! them and hands back update descriptions ([`TextStyleUpdate`],
//! [`PaintStyleUpdate`]) addressed to a single style id.

mod paint;
mod text;
mod variable;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use paint::{Paint, PaintBindings, PaintStyleRecord, PaintStyleUpdate, SolidPaint, VariableAlias};
pub use text::{TextField, TextStyleRecord, TextStyleUpdate};
pub use variable::{Variable, VariableCollection, VariableType};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque identifier of a style in host storage.
    StyleId
);

string_id!(
    /// Opaque identifier of a design variable in host storage.
    VariableId
);

/// Reference to a selected style, in selection order.
///
/// The UI echoes back whole style objects; only the id is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRef {
    pub id: StyleId,
}

impl StyleRef {
    pub fn new(id: impl Into<StyleId>) -> Self {
        Self { id: id.into() }
    }
}

/// Which reconciler an update command targets.
///
/// Anything other than `COLOR` is treated as a text update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleKind {
    Color,
    #[default]
    #[serde(other)]
    Text,
}

impl StyleKind {
    /// Lowercase noun used in notices ("color", "text").
    pub fn noun(&self) -> &'static str {
        match self {
            StyleKind::Color => "color",
            StyleKind::Text => "text",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A font family and style (weight) pair, e.g. `Inter` / `Semi Bold`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// A font the host reports as available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub font_name: FontName,
}

impl From<FontName> for Font {
    fn from(font_name: FontName) -> Self {
        Self { font_name }
    }
}
