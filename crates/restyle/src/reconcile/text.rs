//! Text style reconciliation.
//!
//! Field order matters only for font weight and family: both decide the font
//! that has to be loaded before the style can be written. Everything else is
//! independent per field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::{binding_changes, govern, FieldSource, Governance};
use super::rename::RenameEdit;
use super::Prepared;
use crate::broadcast::Broadcast;
use crate::convert::{LetterSpacing, LineHeight};
use crate::error::ReconcileError;
use crate::host::DocumentHost;
use crate::model::{FontName, TextField, TextStyleRecord, TextStyleUpdate, VariableId};

/// Remaps one font weight to another, e.g. `Medium` to `Semi Bold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMapping {
    pub current_weight: String,
    pub new_weight: String,
}

/// The text part of an update command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEdit {
    pub rename: RenameEdit,
    pub family_name: Option<Broadcast>,
    pub font_weight: Option<Broadcast>,
    pub font_size: Option<Broadcast>,
    pub line_height: Option<Broadcast>,
    pub letter_spacing: Option<Broadcast>,
    /// When present, replaces `font_weight` as the source of new weights.
    pub font_mappings: Option<Vec<FontMapping>>,
    pub variable_bindings: BTreeMap<TextField, Option<VariableId>>,
}

impl TextEdit {
    fn slot(value: &Option<Broadcast>, index: usize, total: usize) -> Option<String> {
        value.as_ref().and_then(|v| v.slot(index, total))
    }
}

/// Reconciles `style`, the `index`-th of `total` selected styles.
///
/// Loads the effective font through `host` and returns the update to commit.
/// Nothing is written to the host here.
pub async fn prepare_text<H: DocumentHost + ?Sized>(
    host: &H,
    style: &TextStyleRecord,
    edit: &TextEdit,
    index: usize,
    total: usize,
) -> Result<Prepared<TextStyleUpdate>, ReconcileError> {
    log::debug!("reconciling text style {} ({})", style.id, style.name);

    let mut governance = BTreeMap::new();
    for field in TextField::ALL {
        let decision = govern(
            host,
            field.as_str(),
            field.required_type(),
            style.bound(field),
            edit.variable_bindings.get(&field),
        )
        .await;
        governance.insert(field, decision);
    }
    let decision = |field: TextField| governance.get(&field).cloned().unwrap_or(Governance::Free);

    let current = &style.font_name;

    let weight_governance = decision(TextField::FontWeight);
    let weight_instruction = if !weight_governance.is_free() {
        None
    } else if let Some(mappings) = &edit.font_mappings {
        let mapping = mappings
            .iter()
            .find(|m| m.current_weight == current.style)
            .ok_or_else(|| {
                log::warn!(
                    "no font mapping for weight '{}' of style {}",
                    current.style,
                    style.id
                );
                ReconcileError::MappingMiss {
                    weight: current.style.clone(),
                }
            })?;
        Some(mapping.new_weight.clone())
    } else {
        TextEdit::slot(&edit.font_weight, index, total)
    };
    let weight = weight_governance.source(weight_instruction, current.style.clone());

    let family_governance = decision(TextField::FontFamily);
    let family_instruction = family_governance
        .is_free()
        .then(|| TextEdit::slot(&edit.family_name, index, total))
        .flatten();
    let family = family_governance.source(family_instruction, current.family.clone());

    let size_governance = decision(TextField::FontSize);
    let size_instruction = match (&edit.font_size, size_governance.is_free()) {
        (Some(value), true) => value.number("fontSize", index, total)?,
        _ => None,
    };
    let font_size = size_governance.source(size_instruction, style.font_size);

    let line_height_governance = decision(TextField::LineHeight);
    let line_height_instruction = line_height_governance
        .is_free()
        .then(|| TextEdit::slot(&edit.line_height, index, total))
        .flatten()
        .map(|text| LineHeight::parse(&text))
        .transpose()
        .map_err(|source| ReconcileError::Unit {
            field: "lineHeight",
            source,
        })?;
    let line_height = line_height_governance.source(line_height_instruction, style.line_height);

    let spacing_governance = decision(TextField::LetterSpacing);
    let spacing_instruction = spacing_governance
        .is_free()
        .then(|| TextEdit::slot(&edit.letter_spacing, index, total))
        .flatten()
        .map(|text| LetterSpacing::parse(&text))
        .transpose()
        .map_err(|source| ReconcileError::Unit {
            field: "letterSpacing",
            source,
        })?;
    let letter_spacing = spacing_governance.source(spacing_instruction, style.letter_spacing);

    let font = effective_font(current, &family, &weight);
    host.load_font(&font).await?;

    let skipped = governance
        .values()
        .filter_map(Governance::skip)
        .cloned()
        .collect();

    let update = TextStyleUpdate {
        name: edit.rename.rename(&style.name),
        description: edit.rename.description(),
        font_family: family.into_direct(),
        font_weight: weight.into_direct(),
        font_size: font_size.into_direct(),
        line_height: line_height.into_direct(),
        letter_spacing: letter_spacing.into_direct(),
        bindings: binding_changes(governance.iter().map(|(field, g)| (*field, g))),
    };

    Ok(Prepared { update, skipped })
}

fn effective_font(
    current: &FontName,
    family: &FieldSource<String>,
    weight: &FieldSource<String>,
) -> FontName {
    FontName::new(family.resolve(&current.family), weight.resolve(&current.style))
}
