//! Batch editing of text and color styles in a design document.
//!
//! `restyle` reads the locally defined text and paint styles of a document,
//! presents them to a UI, and applies bulk edits back to them: renames,
//! color and typography changes, variable bindings, and font-weight remaps.
//! Document storage and the UI are external; they are reached through the
//! [`DocumentHost`] and [`UiBridge`] traits.
//!
//! # Features
//!
//! - **Broadcasting**: one instruction value fans out across the selection,
//!   comma-separated values cycling by index
//! - **Field precedence**: a field bound to a variable stays bound unless the
//!   edit explicitly clears it; direct values never override a binding
//! - **Failure isolation**: each style succeeds, goes missing, or fails on its
//!   own, and the batch reports all three
//! - **Bounded concurrency**: per-style reconciliations run as an
//!   order-preserving group of futures
//!
//! # Sessions
//!
//! ```rust,ignore
//! use restyle::{Config, Session, SessionControl};
//!
//! let mut session = Session::open(host, ui, Config::default())?;
//! let control = session
//!     .handle(serde_json::json!({
//!         "type": "update",
//!         "variant": "TEXT",
//!         "selectedStyles": [{"id": "S:1"}, {"id": "S:2"}],
//!         "fontSize": "14, 16",
//!     }))
//!     .await;
//! assert_eq!(control, SessionControl::Continue);
//! ```
//!
//! Each message is followed by one notice (for edits) and a fresh
//! `postStyles` snapshot.
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. The crate never installs a
//! logger.

pub mod batch;
pub mod broadcast;
pub mod config;
pub mod convert;
mod error;
pub mod host;
pub mod message;
pub mod model;
pub mod notice;
pub mod reconcile;
pub mod session;
pub mod snapshot;

pub use batch::{BatchEntry, BatchKind, BatchResult, Coordinator, Outcome};
pub use broadcast::{expand, Broadcast};
pub use config::{Config, NoticeTemplates, UiConfig};
pub use error::{ConfigError, HostError, ProtocolError, ReconcileError, UnitError};
pub use host::{DocumentHost, UiBridge};
pub use message::{Command, OutboundMessage, RemoveCommand, UpdateCommand};
pub use notice::{Notice, NoticeLevel, NoticeTemplate};
pub use reconcile::{BindingSkip, Change, FieldSource, SkipReason};
pub use session::{Session, SessionControl};
pub use snapshot::{snapshot, StylesPayload};
