//! Selector query construction.
//!
//! A [`Selector`] asks the ledger's rich-query engine for every record of one
//! kind, optionally narrowed by a single equality predicate:
//!
//! ```text
//! {"selector":{"dataType":"certificate","studentPK":"<value>"}}
//! ```
//!
//! Conjunctions over more than one extra field, ranges, sorting and
//! pagination are not expressible.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::DataType;

/// Field name of the certificate holder's public key.
pub const STUDENT_PK_FIELD: &str = "studentPK";

/// Field name of the issuing university's public key.
pub const UNIVERSITY_PK_FIELD: &str = "universityPK";

const DATA_TYPE_FIELD: &str = "dataType";

/// A kind filter plus at most one equality predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    kind: DataType,
    predicate: Option<(String, String)>,
}

#[derive(Serialize)]
struct QueryBody<'a> {
    selector: SelectorBody<'a>,
}

#[derive(Serialize)]
struct SelectorBody<'a> {
    #[serde(rename = "dataType")]
    data_type: DataType,
    #[serde(flatten)]
    predicate: BTreeMap<&'a str, &'a str>,
}

impl Selector {
    /// Match every record of `kind`.
    pub fn kind(kind: DataType) -> Self {
        Self {
            kind,
            predicate: None,
        }
    }

    /// Match every certificate.
    pub fn certificates() -> Self {
        Self::kind(DataType::Certificate)
    }

    /// Certificates held by `student_pk`.
    pub fn certificates_by_student(student_pk: impl Into<String>) -> Self {
        Self::certificates().with_field(STUDENT_PK_FIELD, student_pk)
    }

    /// Certificates issued by `university_pk`.
    pub fn certificates_by_university(university_pk: impl Into<String>) -> Self {
        Self::certificates().with_field(UNIVERSITY_PK_FIELD, university_pk)
    }

    /// Narrow to records whose `field` equals `value`.
    ///
    /// Replaces any previous predicate; only one is supported. A `dataType`
    /// predicate equal to the kind adds nothing and is dropped. One naming a
    /// different kind is kept, and [`Selector::to_query_string`] refuses it.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let field = field.into();
        let value = value.into();
        self.predicate = if field == DATA_TYPE_FIELD && value == self.kind.as_str() {
            None
        } else {
            Some((field, value))
        };
        self
    }

    /// The record kind this selector filters on.
    pub fn data_type(&self) -> DataType {
        self.kind
    }

    /// The extra equality predicate, if any.
    pub fn predicate(&self) -> Option<(&str, &str)> {
        self.predicate
            .as_ref()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Render the query string understood by the ledger's query engine.
    ///
    /// Values are JSON-escaped, so a value containing quotes cannot change
    /// the shape of the selector.
    ///
    /// Fails with [`CoreError::ConflictingPredicate`] when the predicate asks
    /// for a `dataType` other than the selector's kind.
    pub fn to_query_string(&self) -> Result<String> {
        if let Some((field, value)) = self.predicate() {
            if field == DATA_TYPE_FIELD {
                return Err(CoreError::ConflictingPredicate {
                    kind: self.kind,
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let body = QueryBody {
            selector: SelectorBody {
                data_type: self.kind,
                predicate: self.predicate().into_iter().collect(),
            },
        };
        serde_json::to_string(&body).map_err(CoreError::Encode)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Some((field, value)) => write!(f, "dataType={} {}={:?}", self.kind, field, value),
            None => write!(f, "dataType={}", self.kind),
        }
    }
}
