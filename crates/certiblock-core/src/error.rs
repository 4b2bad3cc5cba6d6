//! Error types for CertiBlock Core.

use thiserror::Error;

use crate::types::DataType;

/// Errors that can occur while encoding, decoding, or keying records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decoding error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("record has dataType {found}, expected {expected}")]
    DataTypeMismatch { expected: DataType, found: DataType },

    #[error("invalid ledger key: {0}")]
    InvalidKey(String),

    /// A selector predicate contradicts the selector's kind.
    #[error("selector for {kind} cannot also require {field}={value:?}")]
    ConflictingPredicate {
        kind: DataType,
        field: String,
        value: String,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
