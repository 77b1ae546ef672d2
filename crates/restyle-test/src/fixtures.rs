//! Record and message builders with sensible defaults.

use std::collections::BTreeMap;

use restyle::convert::{parse_hex, LetterSpacing, LineHeight};
use restyle::model::{
    FontName, Paint, PaintStyleRecord, SolidPaint, StyleId, TextStyleRecord, Variable,
    VariableCollection, VariableId, VariableType,
};
use serde_json::{json, Value};

/// An Inter Regular 16px text style with auto line height and no spacing.
pub fn text_style(id: &str, name: &str) -> TextStyleRecord {
    TextStyleRecord {
        id: StyleId::from(id),
        name: name.to_string(),
        description: String::new(),
        font_name: FontName::new("Inter", "Regular"),
        font_size: 16.0,
        line_height: LineHeight::Auto,
        letter_spacing: LetterSpacing::Pixels(0.0),
        bound_variables: BTreeMap::new(),
    }
}

pub fn paint_style(id: &str, name: &str, paints: Vec<Paint>) -> PaintStyleRecord {
    PaintStyleRecord {
        id: StyleId::from(id),
        name: name.to_string(),
        description: String::new(),
        paints,
    }
}

/// A solid paint.
///
/// # Panics
///
/// Panics if `hex` is not a valid hex color.
pub fn solid(hex: &str, opacity: f64) -> Paint {
    let color = parse_hex(hex).unwrap_or_else(|err| panic!("fixture color: {}", err));
    Paint::Solid(SolidPaint::new(color, opacity))
}

/// A solid paint whose color is bound to `variable`.
pub fn bound_solid(hex: &str, opacity: f64, variable: &str) -> Paint {
    match solid(hex, opacity) {
        Paint::Solid(paint) => Paint::Solid(paint.bound_to(VariableId::from(variable))),
        other => other,
    }
}

/// A linear gradient paint, carried opaquely.
pub fn gradient() -> Paint {
    let raw = json!({
        "type": "GRADIENT_LINEAR",
        "gradientStops": [
            {"position": 0, "color": {"r": 1, "g": 1, "b": 1, "a": 1}},
            {"position": 1, "color": {"r": 0, "g": 0, "b": 0, "a": 1}}
        ]
    });
    Paint::Other {
        kind: "GRADIENT_LINEAR".into(),
        raw,
    }
}

pub fn variable(id: &str, name: &str, kind: VariableType, collection: &str) -> Variable {
    Variable {
        id: VariableId::from(id),
        name: name.to_string(),
        resolved_type: kind,
        collection_id: collection.to_string(),
        values_by_mode: BTreeMap::new(),
    }
}

pub fn collection(id: &str, name: &str) -> VariableCollection {
    VariableCollection {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// `selectedStyles` for the given ids, in order.
pub fn selection(ids: &[&str]) -> Value {
    Value::Array(ids.iter().map(|id| json!({ "id": id })).collect())
}

/// An `update` message; `fields` are merged over the base.
pub fn update(variant: &str, ids: &[&str], fields: Value) -> Value {
    let mut message = json!({
        "type": "update",
        "variant": variant,
        "selectedStyles": selection(ids),
    });
    if let (Some(base), Value::Object(extra)) = (message.as_object_mut(), fields) {
        base.extend(extra);
    }
    message
}

pub fn remove(ids: &[&str]) -> Value {
    json!({ "type": "remove", "selectedStyles": selection(ids) })
}
