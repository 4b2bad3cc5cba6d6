//! Ledger trait: the capabilities CertiBlock needs from world state.
//!
//! Three operations only: point get, unconditional point put, and a
//! selector query over a one-shot iterator. Consensus, replication and
//! transaction ordering belong to whoever implements this trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// One entry yielded by a selector query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Bytes,
}

type Entries = Box<dyn Iterator<Item = Result<KeyValue>> + Send>;
type Release = Box<dyn FnOnce() + Send>;

/// A finite, one-shot sequence of query results.
///
/// Order is unspecified. Whatever the ledger holds on behalf of the iterator
/// is released exactly once: on [`QueryIterator::close`], or on drop if the
/// caller bails out early.
pub struct QueryIterator {
    entries: Option<Entries>,
    release: Option<Release>,
}

impl QueryIterator {
    /// Wrap a sequence of results.
    pub fn new<I>(entries: I) -> Self
    where
        I: Iterator<Item = Result<KeyValue>> + Send + 'static,
    {
        Self {
            entries: Some(Box::new(entries)),
            release: None,
        }
    }

    /// An iterator with no results.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Run `release` when the iterator is closed or dropped.
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Release the iterator now.
    pub fn close(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        self.entries = None;
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Iterator for QueryIterator {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.entries.as_mut()?.next();
        if next.is_none() {
            // Exhausted: stay exhausted.
            self.entries = None;
        }
        next
    }
}

impl Drop for QueryIterator {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for QueryIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryIterator")
            .field("exhausted", &self.entries.is_none())
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// The Ledger trait: async access to the shared key-value world state.
///
/// # Contract
///
/// - `get` returns `Ok(None)` for a key that was never written. Absence is
///   not an error.
/// - `put` is an unconditional upsert. No read is required beforehand and no
///   version is checked. A failed put leaves nothing behind.
/// - `query` evaluates a selector expression of the form
///   `{"selector":{"<field>":"<value>", ...}}` against every stored value and
///   yields the matches in no particular order. Results may lag behind the
///   most recent writes.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Point lookup.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Unconditional upsert.
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Selector query.
    async fn query(&self, selector: &str) -> Result<QueryIterator>;
}
