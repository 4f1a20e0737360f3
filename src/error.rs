//! Error types for column and form operations.
//!
//! Decode failures are deliberately flattened: malformed stored text and
//! schema violations both surface as [`FieldError::Validation`] carrying the
//! underlying message. Callers outside the validation path never see a raw
//! `serde_json::Error`.

use thiserror::Error;

/// Result type for column and form operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors surfaced by columns, slots, codecs, and form fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Stored text failed to parse, or a value violated the schema
    #[error("validation failed: {0}")]
    Validation(String),

    /// Value handed to the encoder cannot be represented as JSON
    #[error("value cannot be encoded as JSON: {0}")]
    Encode(String),

    /// Invalid option record supplied at column construction
    #[error("invalid field configuration: {0}")]
    Config(String),
}

impl FieldError {
    /// Create a validation error from any message source
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true for the validation kind
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the carried message text
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Encode(msg) | Self::Config(msg) => msg,
        }
    }
}
