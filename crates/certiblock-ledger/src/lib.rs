//! # CertiBlock Ledger
//!
//! Access to the shared key-value world state that CertiBlock records live
//! in. The [`Ledger`] trait is the whole contract: point get, unconditional
//! point put, and a selector query over a one-shot [`QueryIterator`].
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for world state access
//! - [`QueryIterator`] - One-shot query results, released on close or drop
//! - [`MemoryLedger`] - In-memory world state for tests
//! - [`SqliteLedger`] - SQLite-based persistent world state
//! - [`SelectorQuery`] - The selector subset both ledgers evaluate
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certiblock_ledger::{Ledger, SqliteLedger};
//!
//! async fn example() {
//!     let ledger = SqliteLedger::open("world_state.db").unwrap();
//!
//!     ledger.put("uni_TEDU", br#"{"dataType":"university"}"#).await.unwrap();
//!     let value = ledger.get("uni_TEDU").await.unwrap();
//!     assert!(value.is_some());
//!
//!     let results = ledger
//!         .query(r#"{"selector":{"dataType":"university"}}"#)
//!         .await
//!         .unwrap();
//!     for entry in results {
//!         let entry = entry.unwrap();
//!         println!("{}", entry.key);
//!     }
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Upserts**: `put` never checks for an existing value
//! - **Absence is not an error**: `get` returns `None` for unknown keys
//! - **Unordered results**: callers must not rely on query order
//! - **Scoped iterators**: a dropped iterator releases itself

pub mod error;
pub mod memory;
pub mod migration;
pub mod selector;
pub mod sqlite;
pub mod traits;

pub use error::{LedgerError, Result};
pub use memory::MemoryLedger;
pub use selector::SelectorQuery;
pub use sqlite::SqliteLedger;
pub use traits::{KeyValue, Ledger, QueryIterator};
