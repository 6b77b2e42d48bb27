//! Error types for the docbuild configuration core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable symbolic reason for a field validation failure
///
/// These codes are part of the public contract: front ends key off them to
/// render user-facing messages, so renaming a variant is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `name` field is missing or empty
    NameRequired,
    /// `name` contains characters that are not filesystem-segment-safe
    NameInvalid,
    /// `type` field is missing
    TypeRequired,
    /// `base` is not a string
    BaseInvalid,
    /// `base` resolves to a path that is not an existing directory
    BaseNotADir,
    /// `python` section is not a mapping
    PythonInvalid,
    /// value is not a recognized boolean spelling
    InvalidBool,
    /// value is not a member of the allowed set
    InvalidChoice,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NameRequired => "NAME_REQUIRED",
            ErrorCode::NameInvalid => "NAME_INVALID",
            ErrorCode::TypeRequired => "TYPE_REQUIRED",
            ErrorCode::BaseInvalid => "BASE_INVALID",
            ErrorCode::BaseNotADir => "BASE_NOT_A_DIR",
            ErrorCode::PythonInvalid => "PYTHON_INVALID",
            ErrorCode::InvalidBool => "INVALID_BOOL",
            ErrorCode::InvalidChoice => "INVALID_CHOICE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a pure field validator
///
/// Carries no document context; the configuration object that invoked the
/// validator attaches the field key and source identity, producing an
/// [`InvalidConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: invalid value: {value}")]
pub struct ValidationError {
    /// Symbolic failure reason
    pub code: ErrorCode,
    /// Display form of the offending value
    pub value: String,
}

impl ValidationError {
    pub fn new(code: ErrorCode, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }
}

/// A single configuration field failed validation
///
/// Always attributable to exactly one dotted field path and one stable code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid configuration: {key}: {message} [{code}]")]
pub struct InvalidConfig {
    /// Dotted path of the offending field, e.g. `python.setup_install`
    pub key: String,
    /// Symbolic failure reason
    pub code: ErrorCode,
    /// Human-readable detail
    pub message: String,
    /// Absolute path of the file the document came from, if any
    pub source_file: Option<PathBuf>,
    /// Zero-based index of the document within its source file, if any
    pub source_position: Option<usize>,
}

/// Load-time configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No recognized configuration file anywhere under the project root
    #[error("no configuration file found under: {}", root.display())]
    NoConfigFound { root: PathBuf },

    /// A discovered configuration file yielded zero documents
    #[error("configuration file is empty: {}", path.display())]
    EmptyConfig { path: PathBuf },

    /// A configuration file could not be parsed
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Filesystem failure while discovering or reading configuration
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Environment-supplied defaults could not be extracted
    #[error("environment configuration error: {0}")]
    Environment(String),

    /// Typed accessor was called before the corresponding validator ran
    #[error("configuration field not validated yet: {field}")]
    FieldNotValidated { field: String },

    /// A field failed validation
    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display_is_stable() {
        assert_eq!(ErrorCode::NameRequired.to_string(), "NAME_REQUIRED");
        assert_eq!(ErrorCode::BaseNotADir.to_string(), "BASE_NOT_A_DIR");
        assert_eq!(ErrorCode::InvalidBool.to_string(), "INVALID_BOOL");
        assert_eq!(ErrorCode::InvalidChoice.to_string(), "INVALID_CHOICE");
    }

    #[test]
    fn test_invalid_config_message_includes_key_and_code() {
        let err = InvalidConfig {
            key: "python.setup_install".to_string(),
            code: ErrorCode::InvalidBool,
            message: "expected a boolean".to_string(),
            source_file: None,
            source_position: None,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("python.setup_install"));
        assert!(rendered.contains("INVALID_BOOL"));
    }

    #[test]
    fn test_invalid_config_converts_into_config_error() {
        let err = InvalidConfig {
            key: "name".to_string(),
            code: ErrorCode::NameRequired,
            message: "missing field".to_string(),
            source_file: None,
            source_position: None,
        };
        let top: ConfigError = err.into();
        match top {
            ConfigError::Invalid(inner) => assert_eq!(inner.code, ErrorCode::NameRequired),
            other => panic!("unexpected error: {other}"),
        }
    }
}
