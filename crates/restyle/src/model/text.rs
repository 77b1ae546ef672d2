use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FontName, StyleId, VariableId, VariableType};
use crate::convert::{LetterSpacing, LineHeight};

/// A text-style field that can be governed by a design variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    FontFamily,
    FontWeight,
    FontSize,
    LineHeight,
    LetterSpacing,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::FontFamily,
        TextField::FontWeight,
        TextField::FontSize,
        TextField::LineHeight,
        TextField::LetterSpacing,
    ];

    /// The wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::FontFamily => "fontFamily",
            TextField::FontWeight => "fontWeight",
            TextField::FontSize => "fontSize",
            TextField::LineHeight => "lineHeight",
            TextField::LetterSpacing => "letterSpacing",
        }
    }

    /// The variable type a binding to this field must declare.
    pub fn required_type(&self) -> VariableType {
        match self {
            TextField::FontFamily | TextField::FontWeight => VariableType::String,
            TextField::FontSize | TextField::LineHeight | TextField::LetterSpacing => {
                VariableType::Float
            }
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local text style as stored by the host.
///
/// A field listed in `bound_variables` is governed by that variable; its
/// literal value is whatever the host last resolved and is not authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleRecord {
    pub id: StyleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub font_name: FontName,
    pub font_size: f64,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub bound_variables: BTreeMap<TextField, VariableId>,
}

impl TextStyleRecord {
    /// The variable currently governing `field`, if any.
    pub fn bound(&self, field: TextField) -> Option<&VariableId> {
        self.bound_variables.get(&field)
    }

    /// Applies an update the way the host does.
    ///
    /// Binding changes go first. Every literal written afterwards clears the
    /// binding of its field, so no field ends up both bound and literal.
    pub fn apply(&mut self, update: &TextStyleUpdate) {
        for (field, binding) in &update.bindings {
            match binding {
                Some(id) => {
                    self.bound_variables.insert(*field, id.clone());
                }
                None => {
                    self.bound_variables.remove(field);
                }
            }
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(family) = &update.font_family {
            self.font_name.family = family.clone();
            self.bound_variables.remove(&TextField::FontFamily);
        }
        if let Some(weight) = &update.font_weight {
            self.font_name.style = weight.clone();
            self.bound_variables.remove(&TextField::FontWeight);
        }
        if let Some(size) = update.font_size {
            self.font_size = size;
            self.bound_variables.remove(&TextField::FontSize);
        }
        if let Some(line_height) = update.line_height {
            self.line_height = line_height;
            self.bound_variables.remove(&TextField::LineHeight);
        }
        if let Some(letter_spacing) = update.letter_spacing {
            self.letter_spacing = letter_spacing;
            self.bound_variables.remove(&TextField::LetterSpacing);
        }
    }
}

/// Changes to commit to one text style. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_size: Option<f64>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<LetterSpacing>,
    /// `Some(id)` binds the field, `None` removes its binding.
    pub bindings: BTreeMap<TextField, Option<VariableId>>,
}

impl TextStyleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
