//! Configuration error types with field-level reporting

use std::fmt;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("IO error reading config from '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or JSON for [`FailoverConfig`](super::FailoverConfig)
    #[error("Parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// The file parsed but describes an unusable setup
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// A `${VAR}` placeholder names an unset variable
    #[error("Environment variable '{var}' not found")]
    EnvVarNotFound { var: String },
}

/// Validation failure tied to a field path such as `groups.chat.members[1]`
#[derive(Debug, Error)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `scoring.decay`
    pub field_path: String,

    /// What is wrong with the field
    pub kind: ValidationErrorKind,

    /// Optional hint for the reader
    pub context: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed at '{}': {}", self.field_path, self.kind)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

/// Category of a [`ValidationError`]
#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    /// A field that must be non-empty is missing or empty
    #[error("required field is missing")]
    RequiredFieldMissing,

    /// A scoring factor falls outside its accepted range
    #[error("value out of range: {message}")]
    OutOfRange { message: String },

    /// A member is listed twice in one group
    #[error("duplicate value: {value}")]
    DuplicateValue { value: String },

    /// Two parts of the config contradict each other
    #[error("incompatible configuration: {message}")]
    Incompatible { message: String },

    #[error("invalid version: expected {expected}, got {actual}")]
    InvalidVersion { expected: String, actual: String },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            context: None,
        }
    }

    /// Attach a human-readable hint
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }

    pub fn out_of_range(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::OutOfRange {
                message: message.into(),
            },
        )
    }

    pub fn duplicate(field_path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::DuplicateValue {
                value: value.into(),
            },
        )
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
