//! Error types for the ledger module.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The ledger failed a point lookup.
    #[error("read failed for key {key}: {reason}")]
    Read { key: String, reason: String },

    /// The ledger refused or failed a put.
    #[error("write rejected for key {key}: {reason}")]
    Write { key: String, reason: String },

    /// The selector expression could not be understood.
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The query engine failed while evaluating a selector.
    #[error("query failed for selector {selector}: {reason}")]
    Query { selector: String, reason: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding ledger state was poisoned by a panicking writer.
    #[error("ledger lock poisoned: {0}")]
    Poisoned(String),

    /// A blocking storage task could not be joined.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
