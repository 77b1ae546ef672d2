//! Collaborator traits: the document host and the UI surface.
//!
//! The core never owns style storage. Everything it reads comes from a
//! [`DocumentHost`], and everything it tells the user goes through a
//! [`UiBridge`]. Both are injected when a [`Session`](crate::session::Session)
//! opens.
//!
//! # Sync and async calls
//!
//! Listing local styles and committing updates are synchronous: the host
//! answers them from its in-memory document. Variable lookups and font
//! operations may have to wait on the host and are `async`.
//!
//! # Implementing a host
//!
//! Methods take `&self`. An implementation that mutates state keeps its own
//! interior mutability (a lock or a channel to the real document), since the
//! batch coordinator keeps several reconciliations in flight at once.

use async_trait::async_trait;

use crate::error::HostError;
use crate::message::OutboundMessage;
use crate::model::{
    Font, FontName, PaintStyleRecord, PaintStyleUpdate, StyleId, TextStyleRecord, TextStyleUpdate,
    Variable, VariableCollection, VariableId,
};
use crate::notice::Notice;

/// Host-owned document storage.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// All text styles defined in the document.
    fn local_text_styles(&self) -> Result<Vec<TextStyleRecord>, HostError>;

    /// All paint styles defined in the document.
    fn local_paint_styles(&self) -> Result<Vec<PaintStyleRecord>, HostError>;

    /// Looks up one variable. `Ok(None)` means the id is unknown.
    async fn variable_by_id(&self, id: &VariableId) -> Result<Option<Variable>, HostError>;

    async fn local_variables(&self) -> Result<Vec<Variable>, HostError>;

    async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError>;

    /// Makes a font usable for subsequent text style writes.
    async fn load_font(&self, font: &FontName) -> Result<(), HostError>;

    async fn list_available_fonts(&self) -> Result<Vec<Font>, HostError>;

    /// Applies `update` to the text style `id`.
    ///
    /// Returns [`HostError::StyleNotFound`] if the style has gone away.
    fn update_text_style(&self, id: &StyleId, update: TextStyleUpdate) -> Result<(), HostError>;

    /// Applies `update` to the paint style `id`.
    fn update_paint_style(&self, id: &StyleId, update: PaintStyleUpdate) -> Result<(), HostError>;

    /// Removes a style of either kind. `Ok(false)` means no such style.
    fn remove_style(&self, id: &StyleId) -> Result<bool, HostError>;
}

/// The plugin UI: a panel that receives payloads and a toast channel.
pub trait UiBridge: Send + Sync {
    fn show(&self, width: u32, height: u32);

    fn post(&self, message: OutboundMessage);

    fn notify(&self, notice: &Notice);

    /// Ends the session. No further calls follow.
    fn close(&self);
}
