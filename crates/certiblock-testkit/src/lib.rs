//! # CertiBlock Testkit
//!
//! Testing utilities for CertiBlock.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: stored record bytes and selector strings that must not drift
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: a contract over a memory ledger with keyed parties
//! - **Faulty ledger**: a ledger that fails on demand
//!
//! ## Golden Vectors
//!
//! ```rust
//! use certiblock_testkit::vectors::verify_all_vectors;
//!
//! assert_eq!(verify_all_vectors(), Ok(()));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use certiblock_testkit::generators::new_certificate;
//!
//! proptest! {
//!     #[test]
//!     fn key_is_prefixed(request in new_certificate()) {
//!         let cert = certiblock_core::Certificate::issue(request.clone());
//!         prop_assert_eq!(cert.key(), format!("cert_{}", request.cert_uuid));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use certiblock_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.register_university().await?;
//! let cert = fixture.issue(b"diploma").await?;
//! ```

pub mod faulty;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use faulty::FaultyLedger;
pub use fixtures::{make_request, random_uuid, verify_signature, Party, TestFixture};
pub use generators::{issuance_batch, new_certificate, UniversityParams};
pub use vectors::{all_vectors, selector_vectors, verify_all_vectors, GoldenVector};
