use std::fmt;

use thiserror::Error;

/// A single schema violation found while validating a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation failed: {}", join_violations(.violations))]
    ValidationError { violations: Vec<FieldViolation> },

    #[error("Model pipeline not loaded; the service is degraded until restarted with a valid artifact")]
    ModelUnavailable,

    #[error("Error during prediction: {message}")]
    PredictionError { message: String },
}

impl ServeError {
    pub fn config(message: impl Into<String>) -> Self {
        ServeError::ConfigError {
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        ServeError::PredictionError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServeError>;
