//! In-process doubles for exercising `restyle` sessions.
//!
//! - [`MemoryHost`]: a [`DocumentHost`](restyle::DocumentHost) backed by
//!   in-memory style lists, with switchable faults
//! - [`RecordingUi`]: a [`UiBridge`](restyle::UiBridge) that records every call
//! - [`fixtures`]: terse builders for records and inbound messages
//!
//! ```rust
//! use restyle::{Config, Session};
//! use restyle_test::{fixtures, MemoryHost, RecordingUi};
//!
//! let host = MemoryHost::new().with_text_style(fixtures::text_style("S:1", "Body"));
//! let session = Session::open(host, RecordingUi::new(), Config::default()).unwrap();
//! assert_eq!(session.ui().shown(), Some((540, 780)));
//! ```

pub mod fixtures;
mod host;
mod ui;

pub use host::{Fault, MemoryHost};
pub use ui::{RecordingUi, UiEvent};
