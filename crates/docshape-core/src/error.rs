//! Error types for docshape.
//!
//! Encoding is total and never fails. Every failure surfaced by this
//! workspace comes from decoding a store value, validating caller input,
//! or deserializing a decoded record into a typed shape.

use thiserror::Error;

/// The unified error type for docshape operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A store value could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Caller-supplied configuration or field names were invalid.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A decoded record did not fit the requested typed shape.
    #[error("deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Failures while turning store values back into record values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A value routed into timestamp conversion matched neither the tagged
    /// timestamp nor the two-field `{seconds, nanoseconds}` shape.
    #[error("unacceptable value provided for timestamp: {reason}")]
    UnacceptableTimestamp { reason: String },

    /// The timestamp is well-formed but outside the representable date range.
    #[error("timestamp out of range: {seconds}s {nanoseconds}ns")]
    OutOfRange { seconds: i64, nanoseconds: i64 },
}

impl DecodeError {
    /// Build a [`DecodeError::UnacceptableTimestamp`] with the given reason.
    pub fn unacceptable(reason: impl Into<String>) -> Self {
        DecodeError::UnacceptableTimestamp {
            reason: reason.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Invalid identifier field name.
    #[error("invalid identifier field '{value}': {reason}")]
    IdentifierField { value: String, reason: String },

    /// Invalid transform options.
    #[error("invalid options: {message}")]
    Options { message: String },
}
