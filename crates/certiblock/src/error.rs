//! Error types for contract operations.

use certiblock_core::{CoreError, DataType};
use certiblock_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during contract operations.
///
/// Every variant names the key or selector that failed.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The requested key has never been written.
    #[error("{kind} not found: {key}")]
    NotFound { kind: DataType, key: String },

    /// Stored bytes did not decode to the expected record, or a record
    /// failed to encode.
    #[error("serialization error at {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: CoreError,
    },

    /// The ledger failed a point lookup.
    #[error("read failed for {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: LedgerError,
    },

    /// The ledger rejected or failed a put.
    #[error("write failed for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: LedgerError,
    },

    /// The selector could not be evaluated or its results not read.
    #[error("query failed for {selector}: {source}")]
    Query {
        selector: String,
        #[source]
        source: LedgerError,
    },

    /// A write was refused because the key is already taken.
    ///
    /// Only raised under [`WritePolicy::RejectExisting`](crate::WritePolicy).
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: DataType, key: String },

    /// The host invoked a function this contract does not export.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The host passed the wrong number of arguments.
    #[error("{function} expects {expected} arguments, got {got}")]
    InvalidArguments {
        function: String,
        expected: usize,
        got: usize,
    },
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
