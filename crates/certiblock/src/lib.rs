//! # CertiBlock
//!
//! Verifiable academic certificates on a shared key-value ledger.
//! Universities register profiles, issue certificates to students, and
//! anyone can later look certificates up by UUID, by issuing university, or
//! by holder.
//!
//! ## Overview
//!
//! - **Records**: certificates, university profiles and certificate schemas,
//!   all write-once, all in one flat keyspace
//! - **Keys**: `cert_<certUUID>`, `uni_<name>`, `schema_<id>`
//! - **Queries**: selector queries on `dataType` plus one equality predicate
//! - **Ledger**: anything implementing [`Ledger`]; SQLite and in-memory
//!   world states are bundled
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certiblock::{new_contract, ContractConfig, NewCertificate};
//! use certiblock::ledger::SqliteLedger;
//!
//! async fn example() {
//!     let ledger = SqliteLedger::open("world_state.db").unwrap();
//!     let contract = new_contract(ledger, ContractConfig::default());
//!
//!     contract.init_ledger().await.unwrap();
//!     contract
//!         .register_university("TEDU", "uni-pk", "Ankara", "TED University")
//!         .await
//!         .unwrap();
//!
//!     let cert = contract
//!         .issue_certificate(NewCertificate {
//!             cert_hash: certiblock::core::content_hash(b"diploma"),
//!             university_signature: "uni-sig".into(),
//!             student_signature: "student-sig".into(),
//!             date_of_issuing: "2024-06-30".into(),
//!             cert_uuid: "8c0f7a3e-2f1b-4d0a-9c57-1d2e3f4a5b6c".into(),
//!             university_pk: "uni-pk".into(),
//!             student_pk: "student-pk".into(),
//!         })
//!         .await
//!         .unwrap();
//!
//!     let held = contract.get_all_certificate_by_student("student-pk").await.unwrap();
//!     assert!(held.contains(&cert));
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `certiblock::core` - Records, keys, selectors
//! - `certiblock::ledger` - Ledger trait and bundled world states

pub mod contract;
pub mod dispatch;
pub mod error;

// Re-export component crates
pub use certiblock_core as core;
pub use certiblock_ledger as ledger;

// Re-export main types for convenience
pub use contract::{new_contract, CertContract, ContractConfig, WritePolicy};
pub use dispatch::FUNCTION_NAMES;
pub use error::{ContractError, Result};

// Re-export commonly used core types
pub use certiblock_core::{Certificate, DataType, NewCertificate, Record, Schema, University};
pub use certiblock_ledger::{Ledger, LedgerError};
