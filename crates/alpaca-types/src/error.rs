//! Decoding errors shared by stream replies and resource models

use thiserror::Error;

/// Error produced when a JSON document cannot be turned into a typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Text was not valid JSON
    #[error("Received parse error when deserializing JSON: {0}")]
    ParseError(String),

    /// Valid JSON, but the top-level value was not an object
    #[error("Deserialized valid JSON but it wasn't an object")]
    NotAnObject,

    /// A required key was absent or had the wrong type
    #[error("Reply did not contain a valid `{0}` key")]
    MissingField(&'static str),

    /// The `stream` key named a stream this client does not know
    #[error("Unknown stream string: {0}")]
    UnknownStream(String),

    /// An object field was missing or had a mismatched type
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl DecodeError {
    /// Returns true if the input was not JSON at all
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    pub(crate) fn parse(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }

    pub(crate) fn invalid(err: serde_json::Error) -> Self {
        Self::InvalidField(err.to_string())
    }
}

/// Result type alias for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
