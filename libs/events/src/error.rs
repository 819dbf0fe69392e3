//! Error types for event encoding and decoding.

use thiserror::Error;

/// Errors that can occur when handling events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The stored event tag matches no known event kind.
    #[error("unknown event kind: {0}")]
    UnknownKind(String),

    /// The payload does not match the declared kind's schema.
    #[error("invalid {kind} payload: {message}")]
    Decode { kind: String, message: String },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}
