//! A ledger that fails on demand.
//!
//! Wraps a [`MemoryLedger`] and injects errors into individual operations so
//! tests can check how the contract surfaces ledger failures and that a
//! failed write leaves world state untouched.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use certiblock_ledger::{KeyValue, Ledger, LedgerError, MemoryLedger, QueryIterator, Result};

const NO_LIMIT: usize = usize::MAX;

/// Memory ledger with switchable faults.
pub struct FaultyLedger {
    inner: MemoryLedger,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
    fail_query: AtomicBool,
    /// Yield an error after this many entries.
    fail_iteration_after: AtomicUsize,
    puts: AtomicUsize,
}

impl FaultyLedger {
    /// A ledger with every fault switched off.
    pub fn new() -> Self {
        Self {
            inner: MemoryLedger::new(),
            fail_get: AtomicBool::new(false),
            fail_put: AtomicBool::new(false),
            fail_query: AtomicBool::new(false),
            fail_iteration_after: AtomicUsize::new(NO_LIMIT),
            puts: AtomicUsize::new(0),
        }
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_query(&self, fail: bool) {
        self.fail_query.store(fail, Ordering::SeqCst);
    }

    /// Make query iterators yield an error after `entries` results.
    /// `None` switches this off.
    pub fn fail_iteration_after(&self, entries: Option<usize>) {
        self.fail_iteration_after
            .store(entries.unwrap_or(NO_LIMIT), Ordering::SeqCst);
    }

    /// Successful puts so far.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// The wrapped ledger, for inspecting world state directly.
    pub fn inner(&self) -> &MemoryLedger {
        &self.inner
    }
}

impl Default for FaultyLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for FaultyLedger {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(LedgerError::Read {
                key: key.to_string(),
                reason: "injected read fault".to_string(),
            });
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(LedgerError::Write {
                key: key.to_string(),
                reason: "injected write fault".to_string(),
            });
        }
        self.inner.put(key, value).await?;
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn query(&self, selector: &str) -> Result<QueryIterator> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(LedgerError::Query {
                selector: selector.to_string(),
                reason: "injected query fault".to_string(),
            });
        }

        let results = self.inner.query(selector).await?;
        let limit = self.fail_iteration_after.load(Ordering::SeqCst);
        if limit == NO_LIMIT {
            return Ok(results);
        }

        // The inner iterator travels with the entries, so dropping or
        // closing the wrapper releases it.
        let selector = selector.to_string();
        let entries = results
            .map(Some)
            .chain(std::iter::once(None))
            .enumerate()
            .map_while(move |(i, entry)| -> Option<Result<KeyValue>> {
                if i == limit {
                    return Some(Err(LedgerError::Query {
                        selector: selector.clone(),
                        reason: "injected iteration fault".to_string(),
                    }));
                }
                if i > limit {
                    return None;
                }
                entry
            });
        Ok(QueryIterator::new(entries))
    }
}
