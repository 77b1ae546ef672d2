//! Session configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! ui:
//!   width: 540
//!   height: 780
//! max_concurrent_reconciles: 8
//! notices:
//!   updated: "Updated {{ count }} {{ kind }} styles"
//! ```
//!
//! Notice templates are compiled by [`Config::validate`], which
//! [`Session::open`](crate::session::Session::open) calls before showing the UI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notice::{NoticeRenderer, NoticeTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    /// Upper bound on reconciliations in flight within one batch.
    pub max_concurrent_reconciles: usize,
    pub notices: NoticeTemplates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            max_concurrent_reconciles: 8,
            notices: NoticeTemplates::default(),
        }
    }
}

/// Size of the plugin panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            width: 540,
            height: 780,
        }
    }
}

/// MiniJinja sources for the notices a session emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeTemplates {
    pub updated: String,
    pub removed: String,
    /// Used when every entry of a non-empty batch failed.
    pub failed: String,
    /// Used when an inbound message could not be decoded.
    pub malformed: String,
}

const ERROR_TEXT: &str = "Encountered an error, full output in console";

impl Default for NoticeTemplates {
    fn default() -> Self {
        Self {
            updated: concat!(
                "Successfully updated {{ count }} {{ kind }} styles",
                "{% if not_found %}, {{ not_found }} not found{% endif %}",
                "{% if failed %}, {{ failed }} failed{% endif %}",
                "{% if skipped %}, {{ skipped }} variable bindings skipped{% endif %}"
            )
            .to_string(),
            removed: concat!(
                "Successfully removed {{ count }} styles",
                "{% if not_found %}, {{ not_found }} not found{% endif %}",
                "{% if failed %}, {{ failed }} failed{% endif %}"
            )
            .to_string(),
            failed: ERROR_TEXT.to_string(),
            malformed: ERROR_TEXT.to_string(),
        }
    }
}

impl NoticeTemplates {
    pub fn source(&self, template: NoticeTemplate) -> &str {
        match template {
            NoticeTemplate::Updated => &self.updated,
            NoticeTemplate::Removed => &self.removed,
            NoticeTemplate::Failed => &self.failed,
            NoticeTemplate::Malformed => &self.malformed,
        }
    }

    fn source_mut(&mut self, template: NoticeTemplate) -> &mut String {
        match template {
            NoticeTemplate::Updated => &mut self.updated,
            NoticeTemplate::Removed => &mut self.removed,
            NoticeTemplate::Failed => &mut self.failed,
            NoticeTemplate::Malformed => &mut self.malformed,
        }
    }
}

impl Config {
    /// Parses and validates a YAML config.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(source).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    pub fn with_ui_size(mut self, width: u32, height: u32) -> Self {
        self.ui = UiConfig { width, height };
        self
    }

    pub fn with_max_concurrent_reconciles(mut self, limit: usize) -> Self {
        self.max_concurrent_reconciles = limit;
        self
    }

    pub fn with_notice_template(mut self, template: NoticeTemplate, source: impl Into<String>) -> Self {
        *self.notices.source_mut(template) = source.into();
        self
    }

    /// Checks value ranges and compiles the notice templates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer().map(|_| ())
    }

    /// Validates and returns the compiled notice templates.
    pub(crate) fn renderer(&self) -> Result<NoticeRenderer, ConfigError> {
        if self.max_concurrent_reconciles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_concurrent_reconciles",
                message: "must be at least 1".into(),
            });
        }
        if self.ui.width == 0 || self.ui.height == 0 {
            return Err(ConfigError::Invalid {
                field: "ui",
                message: format!("panel size {}x{} is empty", self.ui.width, self.ui.height),
            });
        }
        NoticeRenderer::new(&self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui, UiConfig { width: 540, height: 780 });
        assert_eq!(config.max_concurrent_reconciles, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml(
            "ui:\n  width: 320\nnotices:\n  removed: \"Deleted {{ count }}\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.width, 320);
        assert_eq!(config.ui.height, 780);
        assert_eq!(config.notices.removed, "Deleted {{ count }}");
        assert_eq!(config.notices.updated, NoticeTemplates::default().updated);
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = Config::from_yaml("max_concurrent_reconciles: 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_concurrent_reconciles",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_template() {
        let config = Config::default().with_notice_template(NoticeTemplate::Updated, "{{ count");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Template { name: "updated", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_yaml("ui: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_concurrent_reconciles: 2").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.max_concurrent_reconciles, 2);
    }

    #[test]
    fn test_from_file_errors_carry_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ui: [").unwrap();
        match Config::from_file(file.path()) {
            Err(ConfigError::Parse { path: Some(path), .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("restyle.yaml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_ui_size(400, 600)
            .with_max_concurrent_reconciles(1);
        assert_eq!(config.ui, UiConfig { width: 400, height: 600 });
        assert_eq!(config.max_concurrent_reconciles, 1);
    }
}
