use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::VariableId;

/// Declared value type of a design variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariableType {
    String,
    Float,
    Color,
    Boolean,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableType::String => "STRING",
            VariableType::Float => "FLOAT",
            VariableType::Color => "COLOR",
            VariableType::Boolean => "BOOLEAN",
        };
        f.write_str(name)
    }
}

/// A design variable definition. Values are passed through to the UI untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub resolved_type: VariableType,
    #[serde(rename = "variableCollectionId")]
    pub collection_id: String,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, serde_json::Value>,
}

/// A named group of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
}
