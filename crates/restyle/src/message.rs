//! Messages exchanged with the UI.
//!
//! Inbound messages are JSON objects discriminated by `type`. Only `update`,
//! `remove`, and `refresh` keep a session alive. Any other type, or none at
//! all, is a request to close.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::broadcast::Broadcast;
use crate::error::ProtocolError;
use crate::model::{StyleKind, StyleRef, TextField, VariableId};
use crate::reconcile::{Change, ColorEdit, FontMapping, RenameEdit, TextEdit};
use crate::snapshot::StylesPayload;

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Update(Box<UpdateCommand>),
    Remove(RemoveCommand),
    Refresh,
    Close,
}

impl Command {
    /// Decodes an inbound message.
    ///
    /// Only the payload of a known type can be malformed. An unknown type is
    /// never an error; it decodes to [`Command::Close`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        match value.get("type").and_then(|t| t.as_str()) {
            Some("update") => serde_json::from_value(value)
                .map(|cmd| Command::Update(Box::new(cmd)))
                .map_err(|err| malformed("update", err)),
            Some("remove") => serde_json::from_value(value)
                .map(Command::Remove)
                .map_err(|err| malformed("remove", err)),
            Some("refresh") => Ok(Command::Refresh),
            _ => Ok(Command::Close),
        }
    }
}

fn malformed(kind: &'static str, err: serde_json::Error) -> ProtocolError {
    ProtocolError::Malformed {
        kind,
        message: err.to_string(),
    }
}

/// A bulk edit of the selected styles.
///
/// Direct values are [`Broadcast`]: one comma-separated value for the whole
/// selection, distributed by index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommand {
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant: StyleKind,
    pub selected_styles: Vec<StyleRef>,

    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub style_match: Change<String>,
    #[serde(default)]
    pub description: Change<String>,

    #[serde(default)]
    pub hue: Option<Broadcast>,
    #[serde(default)]
    pub saturation: Option<Broadcast>,
    #[serde(default)]
    pub lightness: Option<Broadcast>,
    #[serde(default)]
    pub alpha: Option<Broadcast>,
    #[serde(default)]
    pub hex: Option<Broadcast>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_color_variable: bool,
    #[serde(default)]
    pub color_variable_id: Option<VariableId>,

    #[serde(default)]
    pub family_name: Option<Broadcast>,
    #[serde(default)]
    pub font_weight: Option<Broadcast>,
    #[serde(default)]
    pub font_size: Option<Broadcast>,
    #[serde(default)]
    pub line_height: Option<Broadcast>,
    #[serde(default)]
    pub letter_spacing: Option<Broadcast>,
    #[serde(default)]
    pub font_mappings: Option<Vec<FontMapping>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variable_bindings: BTreeMap<TextField, Option<VariableId>>,
}

impl UpdateCommand {
    pub fn rename_edit(&self) -> RenameEdit {
        RenameEdit {
            name: self.style_name.clone(),
            matching: self.style_match.clone(),
            description: self.description.clone(),
        }
    }

    pub fn text_edit(&self) -> TextEdit {
        TextEdit {
            rename: self.rename_edit(),
            family_name: self.family_name.clone(),
            font_weight: self.font_weight.clone(),
            font_size: self.font_size.clone(),
            line_height: self.line_height.clone(),
            letter_spacing: self.letter_spacing.clone(),
            font_mappings: self.font_mappings.clone(),
            variable_bindings: self.variable_bindings.clone(),
        }
    }

    pub fn color_edit(&self) -> ColorEdit {
        ColorEdit {
            rename: self.rename_edit(),
            hue: self.hue.clone(),
            saturation: self.saturation.clone(),
            lightness: self.lightness.clone(),
            alpha: self.alpha.clone(),
            hex: self.hex.clone(),
            use_color_variable: self.use_color_variable,
            color_variable_id: self.color_variable_id.clone(),
        }
    }
}

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Removal of the selected styles, of either kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCommand {
    pub selected_styles: Vec<StyleRef>,
}

/// A message to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "postStyles")]
    PostStyles(StylesPayload),
}
