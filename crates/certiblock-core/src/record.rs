//! Certificate, university and schema records.
//!
//! Each record serializes to a flat JSON object whose member names are the
//! ledger's field names (`certHash`, `universityPK`, ...) plus `dataType`.
//! There is no envelope and no version field.
//!
//! The `dataType` member is fixed by the constructors and cannot be set by
//! callers. Decoding checks it against the requested kind, so bytes written
//! for one kind never decode as another.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::keys::RecordKey;
use crate::types::DataType;

/// Field order of the schema created at ledger initialization.
pub const BACHELOR_SCHEMA_ORDERING: [&str; 4] =
    ["universityName", "major", "departmentName", "cgpa"];

/// Common behavior of every record kind sharing the ledger keyspace.
pub trait Record: Serialize + DeserializeOwned {
    /// The discriminator stored in records of this kind.
    const DATA_TYPE: DataType;

    /// The primary identity field.
    fn identity(&self) -> &str;

    /// The `dataType` carried by this value.
    fn data_type(&self) -> DataType;

    /// The ledger key this record is stored under.
    fn key(&self) -> String {
        Self::key_for(self.identity())
    }

    /// The ledger key for a record of this kind with the given identity.
    fn key_for(identity: &str) -> String {
        RecordKey::new(Self::DATA_TYPE, identity).to_string()
    }

    /// Encode as flat JSON.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(CoreError::Encode)
    }

    /// Decode from flat JSON, rejecting records of another kind.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record: Self = serde_json::from_slice(bytes).map_err(CoreError::Decode)?;
        if record.data_type() != Self::DATA_TYPE {
            return Err(CoreError::DataTypeMismatch {
                expected: Self::DATA_TYPE,
                found: record.data_type(),
            });
        }
        Ok(record)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Certificate
// ─────────────────────────────────────────────────────────────────────────────

/// An academic certificate issued by a university to a student.
///
/// Signatures and public keys are opaque strings. Nothing here checks that
/// `university_pk` or `student_pk` belongs to a registered party.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Content hash of the certificate document.
    pub cert_hash: String,
    pub university_signature: String,
    pub student_signature: String,
    pub date_of_issuing: String,
    /// Assigned number. Empty when unused.
    pub cert_number: String,
    #[serde(rename = "certUUID")]
    pub cert_uuid: String,
    #[serde(rename = "universityPK")]
    pub university_pk: String,
    #[serde(rename = "studentPK")]
    pub student_pk: String,
    data_type: DataType,
}

/// The inputs of a certificate issuance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewCertificate {
    pub cert_hash: String,
    pub university_signature: String,
    pub student_signature: String,
    pub date_of_issuing: String,
    pub cert_uuid: String,
    pub university_pk: String,
    pub student_pk: String,
}

impl Certificate {
    /// Build a certificate with every field given.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cert_hash: impl Into<String>,
        university_signature: impl Into<String>,
        student_signature: impl Into<String>,
        date_of_issuing: impl Into<String>,
        cert_number: impl Into<String>,
        cert_uuid: impl Into<String>,
        university_pk: impl Into<String>,
        student_pk: impl Into<String>,
    ) -> Self {
        Self {
            cert_hash: cert_hash.into(),
            university_signature: university_signature.into(),
            student_signature: student_signature.into(),
            date_of_issuing: date_of_issuing.into(),
            cert_number: cert_number.into(),
            cert_uuid: cert_uuid.into(),
            university_pk: university_pk.into(),
            student_pk: student_pk.into(),
            data_type: DataType::Certificate,
        }
    }

    /// Build a freshly issued certificate. The certificate number is left empty.
    pub fn issue(request: NewCertificate) -> Self {
        Self::new(
            request.cert_hash,
            request.university_signature,
            request.student_signature,
            request.date_of_issuing,
            String::new(),
            request.cert_uuid,
            request.university_pk,
            request.student_pk,
        )
    }
}

impl Record for Certificate {
    const DATA_TYPE: DataType = DataType::Certificate;

    fn identity(&self) -> &str {
        &self.cert_uuid
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// University
// ─────────────────────────────────────────────────────────────────────────────

/// A registered university profile. The name is its identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub name: String,
    pub public_key: String,
    pub location: String,
    pub description: String,
    data_type: DataType,
}

impl University {
    pub fn new(
        name: impl Into<String>,
        public_key: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
            location: location.into(),
            description: description.into(),
            data_type: DataType::University,
        }
    }
}

impl Record for University {
    const DATA_TYPE: DataType = DataType::University;

    fn identity(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Schema
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical presentation order of the fields of one certificate type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub certificate_type: String,
    /// Version identifier, e.g. `v1`.
    pub id: String,
    pub ordering: Vec<String>,
    data_type: DataType,
}

impl Schema {
    pub fn new(
        certificate_type: impl Into<String>,
        id: impl Into<String>,
        ordering: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            certificate_type: certificate_type.into(),
            id: id.into(),
            ordering: ordering.into_iter().map(Into::into).collect(),
            data_type: DataType::Schema,
        }
    }

    /// The `Bachelor`/`v1` schema written at ledger initialization.
    pub fn bachelor_v1() -> Self {
        Self::new("Bachelor", "v1", BACHELOR_SCHEMA_ORDERING)
    }
}

impl Record for Schema {
    const DATA_TYPE: DataType = DataType::Schema;

    fn identity(&self) -> &str {
        &self.id
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}
