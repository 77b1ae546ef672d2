use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use super::{StyleId, VariableId};
use crate::convert::NormalizedRgb;

/// One entry of a paint style's paint list.
///
/// Only SOLID paints are modelled. Every other paint type (gradients, images,
/// video) is carried as its raw host JSON and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(SolidPaint),
    Other {
        kind: String,
        raw: serde_json::Value,
    },
}

impl Paint {
    pub fn solid(color: NormalizedRgb, opacity: f64) -> Self {
        Paint::Solid(SolidPaint::new(color, opacity))
    }

    pub fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Paint::Solid(solid) => Some(solid),
            Paint::Other { .. } => None,
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Paint::Solid(_))
    }

    /// The host's paint type tag (`SOLID`, `GRADIENT_LINEAR`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Paint::Solid(_) => "SOLID",
            Paint::Other { kind, .. } => kind,
        }
    }
}

/// A solid color paint, optionally bound to a COLOR variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: NormalizedRgb,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "PaintBindings::is_empty")]
    pub bound_variables: PaintBindings,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl SolidPaint {
    pub fn new(color: NormalizedRgb, opacity: f64) -> Self {
        Self {
            color,
            opacity,
            visible: true,
            bound_variables: PaintBindings::default(),
        }
    }

    /// Binds this paint's color to a variable.
    pub fn bound_to(mut self, variable: VariableId) -> Self {
        self.bound_variables.color = Some(VariableAlias::new(variable));
        self
    }

    pub fn bound_color(&self) -> Option<&VariableId> {
        self.bound_variables.color.as_ref().map(|alias| &alias.id)
    }
}

/// Variable bindings on a solid paint. Only `color` is bindable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintBindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<VariableAlias>,
}

impl PaintBindings {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }
}

/// The host's reference-to-variable shape: `{type: "VARIABLE_ALIAS", id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type", default = "alias_tag")]
    pub kind: String,
    pub id: VariableId,
}

fn alias_tag() -> String {
    "VARIABLE_ALIAS".to_string()
}

impl VariableAlias {
    pub fn new(id: VariableId) -> Self {
        Self {
            kind: alias_tag(),
            id,
        }
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Paint::Solid(solid) => {
                let mut value = serde_json::to_value(solid).map_err(ser::Error::custom)?;
                if let Some(map) = value.as_object_mut() {
                    map.insert("type".to_string(), serde_json::Value::from("SOLID"));
                }
                value.serialize(serializer)
            }
            Paint::Other { raw, .. } => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let kind = raw
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| de::Error::missing_field("type"))?
            .to_string();
        if kind == "SOLID" {
            serde_json::from_value(raw)
                .map(Paint::Solid)
                .map_err(de::Error::custom)
        } else {
            Ok(Paint::Other { kind, raw })
        }
    }
}

/// A local paint style as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintStyleRecord {
    pub id: StyleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub paints: Vec<Paint>,
}

impl PaintStyleRecord {
    /// Index and content of the first SOLID paint.
    pub fn first_solid(&self) -> Option<(usize, &SolidPaint)> {
        self.paints
            .iter()
            .enumerate()
            .find_map(|(idx, paint)| paint.as_solid().map(|solid| (idx, solid)))
    }

    /// Whether the paint list starts with a SOLID paint. Only such styles are
    /// listed for editing.
    pub fn leads_with_solid(&self) -> bool {
        self.paints.first().is_some_and(Paint::is_solid)
    }

    pub fn apply(&mut self, update: &PaintStyleUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(paints) = &update.paints {
            self.paints = paints.clone();
        }
    }
}

/// Changes to commit to one paint style. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaintStyleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replacement paint list.
    pub paints: Option<Vec<Paint>>,
}

impl PaintStyleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
