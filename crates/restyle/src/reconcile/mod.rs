//! Per-style reconciliation.
//!
//! A reconciler takes one style record, as read at batch start, and one edit
//! instruction, and produces the single update to commit for that style. It
//! performs every check that can fail (variable lookups, parsing, font
//! loading) before anything is written, so a failed reconciliation leaves
//! host storage untouched.
//!
//! - [`text`]: typography fields, variable bindings, weight remapping
//! - [`color`]: the first SOLID paint of a paint style
//! - [`rename`]: name and description edits shared by both
//! - [`field`]: precedence between bindings and direct values

pub mod color;
pub mod field;
pub mod rename;
pub mod text;

pub use color::{prepare_color, ColorEdit};
pub use field::{BindingSkip, FieldSource, SkipReason};
pub use rename::{Change, RenameEdit};
pub use text::{prepare_text, FontMapping, TextEdit};

/// A reconciled update, ready to commit, and the bindings it could not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared<U> {
    pub update: U,
    pub skipped: Vec<BindingSkip>,
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::HostError;
    use crate::host::DocumentHost;
    use crate::model::{
        Font, FontName, PaintStyleRecord, PaintStyleUpdate, StyleId, TextStyleRecord,
        TextStyleUpdate, Variable, VariableCollection, VariableId, VariableType,
    };

    /// Read-only host for reconciler tests. Records font loads.
    #[derive(Default)]
    pub(crate) struct StubHost {
        pub variables: Vec<Variable>,
        pub missing_fonts: Vec<FontName>,
        pub fail_lookups: bool,
        pub loaded: Mutex<Vec<FontName>>,
    }

    impl StubHost {
        pub fn with_variable(mut self, id: &str, kind: VariableType) -> Self {
            self.variables.push(Variable {
                id: VariableId::from(id),
                name: id.to_string(),
                resolved_type: kind,
                collection_id: "C:1".into(),
                values_by_mode: BTreeMap::new(),
            });
            self
        }

        pub fn loaded(&self) -> Vec<FontName> {
            self.loaded.lock().map(|l| l.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl DocumentHost for StubHost {
        fn local_text_styles(&self) -> Result<Vec<TextStyleRecord>, HostError> {
            Ok(Vec::new())
        }

        fn local_paint_styles(&self) -> Result<Vec<PaintStyleRecord>, HostError> {
            Ok(Vec::new())
        }

        async fn variable_by_id(&self, id: &VariableId) -> Result<Option<Variable>, HostError> {
            if self.fail_lookups {
                return Err(HostError::call("getVariableById", "lookup disabled"));
            }
            Ok(self.variables.iter().find(|v| &v.id == id).cloned())
        }

        async fn local_variables(&self) -> Result<Vec<Variable>, HostError> {
            Ok(self.variables.clone())
        }

        async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError> {
            Ok(Vec::new())
        }

        async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
            if self.missing_fonts.contains(font) {
                return Err(HostError::call("loadFont", format!("{} is not available", font)));
            }
            if let Ok(mut loaded) = self.loaded.lock() {
                loaded.push(font.clone());
            }
            Ok(())
        }

        async fn list_available_fonts(&self) -> Result<Vec<Font>, HostError> {
            Ok(Vec::new())
        }

        fn update_text_style(&self, id: &StyleId, _: TextStyleUpdate) -> Result<(), HostError> {
            Err(HostError::StyleNotFound(id.clone()))
        }

        fn update_paint_style(&self, id: &StyleId, _: PaintStyleUpdate) -> Result<(), HostError> {
            Err(HostError::StyleNotFound(id.clone()))
        }

        fn remove_style(&self, _: &StyleId) -> Result<bool, HostError> {
            Ok(false)
        }
    }
}
