//! The record-kind discriminator.
//!
//! Certificates, universities and schemas live side by side in one flat
//! keyspace. The `dataType` member stored in every record is the only thing
//! that tells them apart, both when decoding and when filtering queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Kind of a stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Certificate,
    University,
    Schema,
}

impl DataType {
    /// All record kinds.
    pub const ALL: [DataType; 3] = [DataType::Certificate, DataType::University, DataType::Schema];

    /// The `dataType` string stored in records of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataType::Certificate => "certificate",
            DataType::University => "university",
            DataType::Schema => "schema",
        }
    }

    /// The ledger key prefix for records of this kind.
    pub const fn key_prefix(&self) -> &'static str {
        match self {
            DataType::Certificate => "cert_",
            DataType::University => "uni_",
            DataType::Schema => "schema_",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::InvalidKey(format!("unknown dataType {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DataType::Certificate).unwrap(),
            "\"certificate\""
        );
        assert_eq!(
            serde_json::to_string(&DataType::University).unwrap(),
            "\"university\""
        );
        assert_eq!(serde_json::to_string(&DataType::Schema).unwrap(), "\"schema\"");
    }

    #[test]
    fn test_data_type_from_str() {
        for kind in DataType::ALL {
            assert_eq!(kind.as_str().parse::<DataType>().unwrap(), kind);
        }
        assert!("Certificate".parse::<DataType>().is_err());
    }

    #[test]
    fn test_prefixes_are_disjoint() {
        for a in DataType::ALL {
            for b in DataType::ALL {
                if a != b {
                    assert!(!a.key_prefix().starts_with(b.key_prefix()));
                }
            }
        }
    }
}
