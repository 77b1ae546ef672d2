//! The session: one UI conversation, one inbound message at a time.
//!
//! ```rust,ignore
//! let mut session = Session::open(host, ui, Config::default())?;
//! while let Some(message) = inbox.next().await {
//!     if session.handle(message).await == SessionControl::Close {
//!         break;
//!     }
//! }
//! ```
//!
//! [`Session::handle`] takes `&mut self`, so a second message cannot be
//! handled until the previous batch, its notice, and its snapshot are done.

use crate::batch::{BatchResult, Coordinator};
use crate::config::Config;
use crate::error::{ConfigError, ProtocolError};
use crate::host::{DocumentHost, UiBridge};
use crate::message::Command;
use crate::notice::{Notice, NoticeContext, NoticeRenderer, NoticeTemplate};

/// Whether the session continues after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Close,
}

pub struct Session<H, U> {
    host: H,
    ui: U,
    config: Config,
    notices: NoticeRenderer,
}

impl<H: DocumentHost, U: UiBridge> Session<H, U> {
    /// Validates `config` and shows the UI.
    pub fn open(host: H, ui: U, config: Config) -> Result<Self, ConfigError> {
        let notices = config.renderer()?;
        ui.show(config.ui.width, config.ui.height);
        log::debug!("session opened ({}x{})", config.ui.width, config.ui.height);
        Ok(Self {
            host,
            ui,
            config,
            notices,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn coordinator(&self) -> Coordinator<'_, H, U> {
        Coordinator::new(&self.host, &self.ui, &self.config, &self.notices)
    }

    /// Decodes and handles one raw inbound message.
    ///
    /// A malformed payload is reported to the user with a notice, followed by
    /// a snapshot. The session stays open.
    pub async fn handle(&mut self, message: serde_json::Value) -> SessionControl {
        match Command::from_value(message) {
            Ok(command) => self.handle_command(command).await.0,
            Err(err) => {
                self.reject(&err).await;
                SessionControl::Continue
            }
        }
    }

    /// Handles a decoded command, returning the batch result when one ran.
    pub async fn handle_command(
        &mut self,
        command: Command,
    ) -> (SessionControl, Option<BatchResult>) {
        match command {
            Command::Update(update) => {
                let result = self.coordinator().apply(&update).await;
                (SessionControl::Continue, Some(result))
            }
            Command::Remove(remove) => {
                let result = self.coordinator().remove(&remove).await;
                (SessionControl::Continue, Some(result))
            }
            Command::Refresh => {
                self.coordinator().refresh().await;
                (SessionControl::Continue, None)
            }
            Command::Close => {
                log::debug!("closing session");
                self.ui.close();
                (SessionControl::Close, None)
            }
        }
    }

    async fn reject(&self, err: &ProtocolError) {
        log::error!("{}", err);
        let text = self
            .notices
            .render(NoticeTemplate::Malformed, &NoticeContext::default());
        self.ui.notify(&Notice::error(text));
        self.coordinator().refresh().await;
    }
}
