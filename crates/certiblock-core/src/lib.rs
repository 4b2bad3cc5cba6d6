//! # CertiBlock Core
//!
//! Pure primitives for CertiBlock: certificate records, the ledger key
//! scheme, and selector query construction.
//!
//! This crate contains no I/O, no storage, no networking. It decides how the
//! three record kinds share one flat key-value namespace and how filtered
//! reads are phrased for the ledger's query engine.
//!
//! ## Key Types
//!
//! - [`Certificate`] - An issued academic certificate, keyed by `certUUID`
//! - [`University`] - A registered university profile, keyed by `name`
//! - [`Schema`] - A certificate presentation schema, keyed by version `id`
//! - [`DataType`] - The discriminator stored in every record
//! - [`RecordKey`] - A parsed ledger key
//! - [`Selector`] - A kind filter plus at most one equality predicate
//!
//! ## Keys
//!
//! Keys are the record's identity prefixed by its kind: `cert_<certUUID>`,
//! `uni_<name>`, `schema_<id>`. See [`keys`].

pub mod crypto;
pub mod error;
pub mod keys;
pub mod record;
pub mod selector;
pub mod types;

pub use crypto::{content_hash, Blake3Hash};
pub use error::{CoreError, Result};
pub use keys::{certificate_key, schema_key, university_key, RecordKey};
pub use record::{
    Certificate, NewCertificate, Record, Schema, University, BACHELOR_SCHEMA_ORDERING,
};
pub use selector::{Selector, STUDENT_PK_FIELD, UNIVERSITY_PK_FIELD};
pub use types::DataType;
