//! User-facing notices and the templates that produce them.
//!
//! Every batch ends with exactly one notice. Its text comes from a MiniJinja
//! template in [`NoticeTemplates`](crate::config::NoticeTemplates), rendered
//! with a [`NoticeContext`]:
//!
//! | Variable    | Value                                         |
//! |-------------|-----------------------------------------------|
//! | `count`     | styles updated (or removed)                   |
//! | `kind`      | `text` or `color`                             |
//! | `not_found` | selected styles missing from the document     |
//! | `failed`    | styles whose reconciliation failed            |
//! | `skipped`   | variable bindings that could not be applied   |

use minijinja::{Environment, Value};
use serde::{Deserialize, Serialize};

use crate::config::NoticeTemplates;
use crate::error::ConfigError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A short message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }
}

/// Names the configurable notice templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTemplate {
    Updated,
    Removed,
    Failed,
    Malformed,
}

impl NoticeTemplate {
    pub const ALL: [NoticeTemplate; 4] = [
        NoticeTemplate::Updated,
        NoticeTemplate::Removed,
        NoticeTemplate::Failed,
        NoticeTemplate::Malformed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NoticeTemplate::Updated => "updated",
            NoticeTemplate::Removed => "removed",
            NoticeTemplate::Failed => "failed",
            NoticeTemplate::Malformed => "malformed",
        }
    }
}

/// Values available to notice templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoticeContext {
    pub count: usize,
    pub kind: String,
    pub not_found: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl NoticeContext {
    /// Untemplated text, used when a template fails to render.
    fn plain(&self, template: NoticeTemplate) -> String {
        match template {
            NoticeTemplate::Updated => format!(
                "Updated {} {} styles ({} not found, {} failed, {} bindings skipped)",
                self.count, self.kind, self.not_found, self.failed, self.skipped
            ),
            NoticeTemplate::Removed => format!(
                "Removed {} styles ({} not found, {} failed)",
                self.count, self.not_found, self.failed
            ),
            NoticeTemplate::Failed | NoticeTemplate::Malformed => {
                "Encountered an error".to_string()
            }
        }
    }
}

/// Compiled notice templates.
pub struct NoticeRenderer {
    env: Environment<'static>,
}

impl NoticeRenderer {
    /// Compiles every template, failing on the first syntax error.
    pub fn new(templates: &NoticeTemplates) -> Result<Self, ConfigError> {
        let mut env = Environment::new();
        for template in NoticeTemplate::ALL {
            env.add_template_owned(template.name(), templates.source(template).to_string())
                .map_err(|err| ConfigError::Template {
                    name: template.name(),
                    message: err.to_string(),
                })?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, template: NoticeTemplate, context: &NoticeContext) -> String {
        let rendered = self
            .env
            .get_template(template.name())
            .and_then(|tmpl| tmpl.render(Value::from_serialize(context)));
        match rendered {
            Ok(text) => text,
            Err(err) => {
                log::error!("notice template '{}' failed: {}", template.name(), err);
                context.plain(template)
            }
        }
    }
}

impl std::fmt::Debug for NoticeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> NoticeRenderer {
        NoticeRenderer::new(&NoticeTemplates::default()).unwrap()
    }

    fn context(count: usize, not_found: usize, failed: usize, skipped: usize) -> NoticeContext {
        NoticeContext {
            count,
            kind: "color".into(),
            not_found,
            failed,
            skipped,
        }
    }

    #[test]
    fn test_default_updated_text() {
        let text = renderer().render(NoticeTemplate::Updated, &context(2, 0, 0, 0));
        assert_eq!(text, "Successfully updated 2 color styles");
    }

    #[test]
    fn test_updated_text_mentions_problems() {
        let text = renderer().render(NoticeTemplate::Updated, &context(1, 1, 2, 3));
        assert_eq!(
            text,
            "Successfully updated 1 color styles, 1 not found, 2 failed, 3 variable bindings skipped"
        );
    }

    #[test]
    fn test_default_removed_and_failed_text() {
        let renderer = renderer();
        assert_eq!(
            renderer.render(NoticeTemplate::Removed, &context(3, 0, 0, 0)),
            "Successfully removed 3 styles"
        );
        assert_eq!(
            renderer.render(NoticeTemplate::Failed, &context(0, 0, 2, 0)),
            "Encountered an error, full output in console"
        );
    }

    #[test]
    fn test_invalid_template_is_config_error() {
        let templates = NoticeTemplates {
            removed: "{% if count %}unclosed".into(),
            ..Default::default()
        };
        let err = NoticeRenderer::new(&templates).unwrap_err();
        assert!(matches!(err, ConfigError::Template { name: "removed", .. }));
    }

    #[test]
    fn test_render_error_falls_back_to_plain_text() {
        let templates = NoticeTemplates {
            updated: "{{ count | no_such_filter }}".into(),
            ..Default::default()
        };
        // unknown filters are only detected at render time
        match NoticeRenderer::new(&templates) {
            Ok(renderer) => {
                let text = renderer.render(NoticeTemplate::Updated, &context(2, 0, 0, 0));
                assert!(text.starts_with("Updated 2 color styles"));
            }
            Err(err) => assert!(matches!(err, ConfigError::Template { .. })),
        }
    }

    #[test]
    fn test_notice_serialization() {
        let json = serde_json::to_value(Notice::warning("careful")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["text"], "careful");
    }
}
