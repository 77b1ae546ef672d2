use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use restyle::model::{
    Font, FontName, PaintStyleRecord, PaintStyleUpdate, StyleId, TextStyleRecord,
    TextStyleUpdate, Variable, VariableCollection, VariableId,
};
use restyle::{DocumentHost, HostError};

/// A host operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    TextListing,
    PaintListing,
    VariableLookup,
    VariableListing,
    CollectionListing,
    FontListing,
    /// Every font load fails, available or not.
    FontLoad,
    /// Style updates fail after the style was found.
    Commit,
}

#[derive(Default)]
struct State {
    text_styles: Vec<TextStyleRecord>,
    paint_styles: Vec<PaintStyleRecord>,
    variables: Vec<Variable>,
    collections: Vec<VariableCollection>,
    fonts: Vec<FontName>,
    loaded: Vec<FontName>,
    commits: Vec<StyleId>,
    vanishing: Vec<StyleId>,
    faults: Vec<Fault>,
}

/// In-memory document storage.
///
/// Fonts must be registered as available before they load. Adding a text
/// style registers its current font.
#[derive(Default)]
pub struct MemoryHost {
    state: RwLock<State>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn faulty(&self, fault: Fault) -> bool {
        self.read().faults.contains(&fault)
    }

    // ─── Builders ───────────────────────────────────────────────────────────

    pub fn with_text_style(self, style: TextStyleRecord) -> Self {
        {
            let mut state = self.write();
            if !state.fonts.contains(&style.font_name) {
                state.fonts.push(style.font_name.clone());
            }
            state.text_styles.push(style);
        }
        self
    }

    pub fn with_paint_style(self, style: PaintStyleRecord) -> Self {
        self.write().paint_styles.push(style);
        self
    }

    pub fn with_variable(self, variable: Variable) -> Self {
        self.write().variables.push(variable);
        self
    }

    pub fn with_collection(self, collection: VariableCollection) -> Self {
        self.write().collections.push(collection);
        self
    }

    pub fn with_font(self, font: FontName) -> Self {
        self.write().fonts.push(font);
        self
    }

    pub fn with_fault(self, fault: Fault) -> Self {
        self.set_fault(fault);
        self
    }

    /// Deletes `id` right before its first update is applied, as if another
    /// edit removed it mid-batch.
    pub fn vanishing(self, id: &str) -> Self {
        self.write().vanishing.push(StyleId::from(id));
        self
    }

    pub fn set_fault(&self, fault: Fault) {
        let mut state = self.write();
        if !state.faults.contains(&fault) {
            state.faults.push(fault);
        }
    }

    pub fn clear_faults(&self) {
        self.write().faults.clear();
    }

    // ─── Inspection ─────────────────────────────────────────────────────────

    pub fn text_style(&self, id: &str) -> Option<TextStyleRecord> {
        self.read()
            .text_styles
            .iter()
            .find(|s| s.id.as_str() == id)
            .cloned()
    }

    pub fn paint_style(&self, id: &str) -> Option<PaintStyleRecord> {
        self.read()
            .paint_styles
            .iter()
            .find(|s| s.id.as_str() == id)
            .cloned()
    }

    pub fn text_styles(&self) -> Vec<TextStyleRecord> {
        self.read().text_styles.clone()
    }

    pub fn paint_styles(&self) -> Vec<PaintStyleRecord> {
        self.read().paint_styles.clone()
    }

    /// Fonts loaded so far, in load order.
    pub fn loaded_fonts(&self) -> Vec<FontName> {
        self.read().loaded.clone()
    }

    /// Ids of successfully updated styles, in commit order.
    pub fn commits(&self) -> Vec<StyleId> {
        self.read().commits.clone()
    }

    fn take_vanishing(&self, id: &StyleId) {
        let mut state = self.write();
        if let Some(pos) = state.vanishing.iter().position(|v| v == id) {
            state.vanishing.remove(pos);
            state.text_styles.retain(|s| &s.id != id);
            state.paint_styles.retain(|s| &s.id != id);
        }
    }
}

#[async_trait]
impl DocumentHost for MemoryHost {
    fn local_text_styles(&self) -> Result<Vec<TextStyleRecord>, HostError> {
        if self.faulty(Fault::TextListing) {
            return Err(HostError::call("getLocalTextStyles", "injected fault"));
        }
        Ok(self.text_styles())
    }

    fn local_paint_styles(&self) -> Result<Vec<PaintStyleRecord>, HostError> {
        if self.faulty(Fault::PaintListing) {
            return Err(HostError::call("getLocalPaintStyles", "injected fault"));
        }
        Ok(self.paint_styles())
    }

    async fn variable_by_id(&self, id: &VariableId) -> Result<Option<Variable>, HostError> {
        if self.faulty(Fault::VariableLookup) {
            return Err(HostError::call("getVariableById", "injected fault"));
        }
        Ok(self.read().variables.iter().find(|v| &v.id == id).cloned())
    }

    async fn local_variables(&self) -> Result<Vec<Variable>, HostError> {
        if self.faulty(Fault::VariableListing) {
            return Err(HostError::call("getLocalVariables", "injected fault"));
        }
        Ok(self.read().variables.clone())
    }

    async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError> {
        if self.faulty(Fault::CollectionListing) {
            return Err(HostError::call("getLocalVariableCollections", "injected fault"));
        }
        Ok(self.read().collections.clone())
    }

    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        if self.faulty(Fault::FontLoad) {
            return Err(HostError::call("loadFont", "injected fault"));
        }
        let mut state = self.write();
        if !state.fonts.contains(font) {
            return Err(HostError::call("loadFont", format!("font '{}' is not available", font)));
        }
        state.loaded.push(font.clone());
        Ok(())
    }

    async fn list_available_fonts(&self) -> Result<Vec<Font>, HostError> {
        if self.faulty(Fault::FontListing) {
            return Err(HostError::call("listAvailableFonts", "injected fault"));
        }
        Ok(self.read().fonts.iter().cloned().map(Font::from).collect())
    }

    fn update_text_style(&self, id: &StyleId, update: TextStyleUpdate) -> Result<(), HostError> {
        self.take_vanishing(id);
        if self.faulty(Fault::Commit) {
            return Err(HostError::call("updateTextStyle", "injected fault"));
        }
        let mut state = self.write();
        let style = state
            .text_styles
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| HostError::StyleNotFound(id.clone()))?;
        style.apply(&update);
        state.commits.push(id.clone());
        Ok(())
    }

    fn update_paint_style(&self, id: &StyleId, update: PaintStyleUpdate) -> Result<(), HostError> {
        self.take_vanishing(id);
        if self.faulty(Fault::Commit) {
            return Err(HostError::call("updatePaintStyle", "injected fault"));
        }
        let mut state = self.write();
        let style = state
            .paint_styles
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| HostError::StyleNotFound(id.clone()))?;
        style.apply(&update);
        state.commits.push(id.clone());
        Ok(())
    }

    fn remove_style(&self, id: &StyleId) -> Result<bool, HostError> {
        if self.faulty(Fault::Commit) {
            return Err(HostError::call("remove", "injected fault"));
        }
        let mut state = self.write();
        let before = state.text_styles.len() + state.paint_styles.len();
        state.text_styles.retain(|s| &s.id != id);
        state.paint_styles.retain(|s| &s.id != id);
        Ok(state.text_styles.len() + state.paint_styles.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_fonts_must_be_available() {
        let host = MemoryHost::new().with_text_style(fixtures::text_style("S:1", "Body"));
        assert!(host.load_font(&FontName::new("Inter", "Regular")).await.is_ok());
        assert!(host.load_font(&FontName::new("Inter", "Black")).await.is_err());
        assert_eq!(host.loaded_fonts(), vec![FontName::new("Inter", "Regular")]);
    }

    #[tokio::test]
    async fn test_faults() {
        let host = MemoryHost::new().with_fault(Fault::VariableLookup);
        assert!(host.variable_by_id(&VariableId::from("V:1")).await.is_err());
        host.clear_faults();
        assert_eq!(host.variable_by_id(&VariableId::from("V:1")).await, Ok(None));
    }

    #[test]
    fn test_update_missing_style() {
        let host = MemoryHost::new();
        let err = host
            .update_text_style(&StyleId::from("S:nope"), TextStyleUpdate::default())
            .unwrap_err();
        assert_eq!(err, HostError::StyleNotFound(StyleId::from("S:nope")));
    }

    #[test]
    fn test_vanishing_style() {
        let host = MemoryHost::new()
            .with_text_style(fixtures::text_style("S:1", "Body"))
            .vanishing("S:1");
        assert_eq!(host.local_text_styles().unwrap().len(), 1);
        let err = host
            .update_text_style(&StyleId::from("S:1"), TextStyleUpdate::default())
            .unwrap_err();
        assert!(matches!(err, HostError::StyleNotFound(_)));
        assert!(host.commits().is_empty());
    }

    #[test]
    fn test_remove() {
        let host = MemoryHost::new()
            .with_text_style(fixtures::text_style("S:1", "Body"))
            .with_paint_style(fixtures::paint_style("S:2", "Red", vec![fixtures::solid("#FF0000", 1.0)]));
        assert_eq!(host.remove_style(&StyleId::from("S:2")), Ok(true));
        assert_eq!(host.remove_style(&StyleId::from("S:2")), Ok(false));
        assert!(host.text_style("S:1").is_some());
    }
}
