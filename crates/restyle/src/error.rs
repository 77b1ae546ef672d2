//! Error types for reconciliation, host calls, and session setup.
//!
//! Per-style failures ([`ReconcileError`]) never abort a batch: the
//! coordinator records them against the entry that produced them and moves on.
//! Only [`ConfigError`] can stop a session from opening.

use std::path::PathBuf;

use crate::model::StyleId;

/// Failure reported by a [`DocumentHost`](crate::host::DocumentHost) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The addressed style no longer exists in host storage.
    #[error("style '{0}' does not exist")]
    StyleNotFound(StyleId),

    /// A host operation raised an error.
    #[error("{operation} failed: {message}")]
    Call {
        operation: &'static str,
        message: String,
    },
}

impl HostError {
    /// Create a failed-call error for the named host operation.
    pub fn call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            operation,
            message: message.into(),
        }
    }
}

/// Failure converting a displayed length or color into the host representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// Text that should have parsed as a number did not.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// `AUTO` was used for a length that only accepts pixels or percent.
    #[error("AUTO is only valid for line height")]
    AutoNotAllowed,

    /// A pixel or percent length arrived without a value.
    #[error("{0} length is missing its value")]
    MissingValue(&'static str),

    /// Hex color with the wrong number of digits or a non-hex digit.
    #[error("invalid hex color '#{0}' (must be 3 or 6 digits)")]
    InvalidHex(String),
}

/// Failure reconciling a single style. Reported against that style only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReconcileError {
    /// `fontMappings` was supplied but has no entry for the current weight.
    #[error("no font mapping for current weight '{weight}'")]
    MappingMiss { weight: String },

    /// A broadcast slot for a numeric field did not parse.
    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A broadcast slot held an unparseable hex color.
    #[error("invalid color '{value}'")]
    InvalidColor { value: String },

    /// A line-height or letter-spacing slot did not convert.
    #[error("invalid {field}: {source}")]
    Unit {
        field: &'static str,
        #[source]
        source: UnitError,
    },

    /// A color edit addressed a style without any SOLID paint.
    #[error("style has no solid paint to edit")]
    NoSolidPaint,

    /// A host call the reconciliation depends on failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Failure decoding an inbound UI message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The payload for a known message type did not match its schema.
    #[error("malformed '{kind}' message: {message}")]
    Malformed { kind: &'static str, message: String },
}

/// Failure loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML parse error.
    #[error("failed to parse config{}: {message}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A notice template failed to compile.
    #[error("invalid notice template '{name}': {message}")]
    Template { name: &'static str, message: String },

    /// A value is outside its allowed range.
    #[error("invalid config value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
