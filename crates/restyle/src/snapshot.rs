//! The `postStyles` payload: everything the UI needs to render its lists.
//!
//! A snapshot is best effort. A failed host listing is logged and replaced by
//! an empty list so the UI always receives a well-formed payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::convert::{Hsl, Rgb255};
use crate::error::HostError;
use crate::host::DocumentHost;
use crate::model::{
    Font, FontName, Paint, PaintStyleRecord, StyleId, TextField, TextStyleRecord, Variable,
    VariableCollection, VariableId, VariableType,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylesPayload {
    pub text_styles: Vec<TextStyleView>,
    pub color_styles: Vec<ColorStyleView>,
    pub available_fonts: Vec<Font>,
    pub variables: Vec<VariableView>,
}

/// A text style reduced to what the UI displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleView {
    pub id: StyleId,
    pub name: String,
    pub description: String,
    pub font_name: FontName,
    pub font_size: f64,
    /// `AUTO`, `150%`, or `24`.
    pub line_height: String,
    pub letter_spacing: String,
    pub bound_variables: BTreeMap<TextField, VariableId>,
}

impl From<&TextStyleRecord> for TextStyleView {
    fn from(style: &TextStyleRecord) -> Self {
        Self {
            id: style.id.clone(),
            name: style.name.clone(),
            description: style.description.clone(),
            font_name: style.font_name.clone(),
            font_size: style.font_size,
            line_height: style.line_height.to_string(),
            letter_spacing: style.letter_spacing.to_string(),
            bound_variables: style.bound_variables.clone(),
        }
    }
}

/// Integer HSL as shown in the color editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HslView {
    pub h: i64,
    pub s: i64,
    pub l: i64,
}

/// A paint style whose first paint is SOLID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStyleView {
    pub id: StyleId,
    pub name: String,
    pub description: String,
    pub paints: Vec<Paint>,
    /// First paint's color on the 0–255 scale.
    pub color: Rgb255,
    pub hex: String,
    pub hsl: HslView,
    pub opacity: f64,
    pub color_variable_id: Option<VariableId>,
}

impl ColorStyleView {
    /// Builds the view, or `None` when the first paint is not SOLID.
    pub fn from_record(style: &PaintStyleRecord) -> Option<Self> {
        if !style.leads_with_solid() {
            return None;
        }
        let (_, solid) = style.first_solid()?;
        let (h, s, l) = Hsl::from_normalized(solid.color).display();
        Some(Self {
            id: style.id.clone(),
            name: style.name.clone(),
            description: style.description.clone(),
            paints: style.paints.clone(),
            color: solid.color.scaled(),
            hex: solid.color.to_hex(),
            hsl: HslView { h, s, l },
            opacity: solid.opacity,
            color_variable_id: solid.bound_color().cloned(),
        })
    }
}

/// A variable joined with the name of its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableView {
    pub id: VariableId,
    pub name: String,
    pub resolved_type: VariableType,
    pub values_by_mode: BTreeMap<String, serde_json::Value>,
    pub collection_id: String,
    /// Empty when the collection is unknown.
    pub collection_name: String,
}

impl VariableView {
    fn joined(variable: Variable, collections: &[VariableCollection]) -> Self {
        let collection_name = collections
            .iter()
            .find(|c| c.id == variable.collection_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Self {
            id: variable.id,
            name: variable.name,
            resolved_type: variable.resolved_type,
            values_by_mode: variable.values_by_mode,
            collection_id: variable.collection_id,
            collection_name,
        }
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, HostError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::warn!("snapshot: {} unavailable: {}", what, err);
        Vec::new()
    })
}

/// Reads the current document state into a payload.
pub async fn snapshot<H: DocumentHost + ?Sized>(host: &H) -> StylesPayload {
    let text_styles = or_empty("text styles", host.local_text_styles())
        .iter()
        .map(TextStyleView::from)
        .collect();
    let color_styles = or_empty("paint styles", host.local_paint_styles())
        .iter()
        .filter_map(|style| {
            let view = ColorStyleView::from_record(style);
            if view.is_none() {
                log::debug!(
                    "snapshot: paint style {} not listed (first paint {})",
                    style.id,
                    style.paints.first().map_or("none", Paint::kind)
                );
            }
            view
        })
        .collect();
    let available_fonts = or_empty("fonts", host.list_available_fonts().await);

    let variables = match (
        host.local_variable_collections().await,
        host.local_variables().await,
    ) {
        (Ok(collections), Ok(variables)) => variables
            .into_iter()
            .map(|v| VariableView::joined(v, &collections))
            .collect(),
        (Err(err), _) | (_, Err(err)) => {
            log::warn!("snapshot: variables unavailable: {}", err);
            Vec::new()
        }
    };

    StylesPayload {
        text_styles,
        color_styles,
        available_fonts,
        variables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{LetterSpacing, LineHeight, NormalizedRgb};
    use crate::model::SolidPaint;
    use serde_json::json;

    #[test]
    fn test_text_view_display_strings() {
        let style = TextStyleRecord {
            id: StyleId::from("S:1"),
            name: "Body".into(),
            description: String::new(),
            font_name: FontName::new("Inter", "Regular"),
            font_size: 16.0,
            line_height: LineHeight::Percent(150.0),
            letter_spacing: LetterSpacing::Pixels(-0.256),
            bound_variables: BTreeMap::from([(TextField::FontSize, VariableId::from("V:1"))]),
        };
        let view = TextStyleView::from(&style);
        assert_eq!(view.line_height, "150%");
        assert_eq!(view.letter_spacing, "-0.26");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["fontName"]["family"], "Inter");
        assert_eq!(json["boundVariables"]["fontSize"], "V:1");
    }

    #[test]
    fn test_color_view_requires_leading_solid() {
        let solid = PaintStyleRecord {
            id: StyleId::from("S:1"),
            name: "Red".into(),
            description: String::new(),
            paints: vec![Paint::Solid(
                SolidPaint::new(NormalizedRgb::new(1.0, 0.0, 0.0), 0.5).bound_to(VariableId::from("V:red")),
            )],
        };
        let view = ColorStyleView::from_record(&solid).unwrap();
        assert_eq!(view.color, Rgb255 { r: 255.0, g: 0.0, b: 0.0 });
        assert_eq!(view.hex, "#FF0000");
        assert_eq!(view.hsl, HslView { h: 0, s: 100, l: 50 });
        assert_eq!(view.opacity, 0.5);
        assert_eq!(view.color_variable_id, Some(VariableId::from("V:red")));

        let image_first = PaintStyleRecord {
            paints: vec![Paint::Other {
                kind: "IMAGE".into(),
                raw: json!({"type": "IMAGE"}),
            }],
            ..solid.clone()
        };
        assert!(ColorStyleView::from_record(&image_first).is_none());

        let empty = PaintStyleRecord {
            paints: Vec::new(),
            ..solid
        };
        assert!(ColorStyleView::from_record(&empty).is_none());
    }

    #[test]
    fn test_variable_join() {
        let variable = Variable {
            id: VariableId::from("V:1"),
            name: "space/4".into(),
            resolved_type: VariableType::Float,
            collection_id: "C:spacing".into(),
            values_by_mode: BTreeMap::from([("M:1".to_string(), json!(16))]),
        };
        let collections = vec![VariableCollection {
            id: "C:spacing".into(),
            name: "Spacing".into(),
        }];
        let view = VariableView::joined(variable.clone(), &collections);
        assert_eq!(view.collection_name, "Spacing");

        let orphan = VariableView::joined(variable, &[]);
        assert_eq!(orphan.collection_name, "");
        let json = serde_json::to_value(&orphan).unwrap();
        assert_eq!(json["collectionId"], "C:spacing");
        assert_eq!(json["resolvedType"], "FLOAT");
    }
}
