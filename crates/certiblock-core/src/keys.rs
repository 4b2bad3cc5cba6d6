//! The ledger key scheme.
//!
//! A key is the record's identity field prefixed by its kind. Prefixes are
//! disjoint, so keys of different kinds never collide as long as identity
//! values do not themselves smuggle in another kind's prefix. That is a
//! precondition on callers and is not checked here.
//!
//! Keys carry no version or timestamp: writing the same identity twice
//! addresses the same key.

use std::fmt;

use crate::error::CoreError;
use crate::types::DataType;

/// Ledger key for a certificate.
pub fn certificate_key(cert_uuid: &str) -> String {
    RecordKey::new(DataType::Certificate, cert_uuid).to_string()
}

/// Ledger key for a university profile.
pub fn university_key(name: &str) -> String {
    RecordKey::new(DataType::University, name).to_string()
}

/// Ledger key for a certificate schema.
pub fn schema_key(version: &str) -> String {
    RecordKey::new(DataType::Schema, version).to_string()
}

/// A ledger key split into its kind and identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub kind: DataType,
    pub identity: String,
}

impl RecordKey {
    pub fn new(kind: DataType, identity: impl Into<String>) -> Self {
        Self {
            kind,
            identity: identity.into(),
        }
    }

    /// Split a raw ledger key back into kind and identity.
    ///
    /// An identity may be empty.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        DataType::ALL
            .into_iter()
            .find_map(|kind| {
                key.strip_prefix(kind.key_prefix())
                    .map(|identity| Self::new(kind, identity))
            })
            .ok_or_else(|| CoreError::InvalidKey(key.to_string()))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.key_prefix(), self.identity)
    }
}
