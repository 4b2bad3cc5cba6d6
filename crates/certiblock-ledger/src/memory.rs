//! In-memory implementation of the Ledger trait.
//!
//! Same semantics as the SQLite ledger with no persistence. Used by tests
//! and by anything that wants a throwaway world state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{LedgerError, Result};
use crate::selector::SelectorQuery;
use crate::traits::{KeyValue, Ledger, QueryIterator};

/// In-memory world state.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
pub struct MemoryLedger {
    state: RwLock<HashMap<String, Bytes>>,
    /// Query iterators handed out and not yet released.
    open_iterators: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            open_iterators: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of keys in world state.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Whether world state is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.read()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Query iterators that have not been closed or dropped yet.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Bytes>>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Bytes>>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(LedgerError::Write {
                key: String::new(),
                reason: "key must not be empty".to_string(),
            });
        }
        self.write()?
            .insert(key.to_string(), Bytes::copy_from_slice(value));
        Ok(())
    }

    async fn query(&self, selector: &str) -> Result<QueryIterator> {
        let query = SelectorQuery::parse(selector)?;

        // Snapshot now, match lazily as the caller pulls.
        let snapshot: Vec<(String, Bytes)> = self
            .read()?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let matches = snapshot
            .into_iter()
            .filter(move |(_, value)| query.matches(value))
            .map(|(key, value)| Ok(KeyValue { key, value }));

        self.open_iterators.fetch_add(1, Ordering::SeqCst);
        let open = Arc::clone(&self.open_iterators);
        Ok(QueryIterator::new(matches).on_release(move || {
            open.fetch_sub(1, Ordering::SeqCst);
        }))
    }
}
