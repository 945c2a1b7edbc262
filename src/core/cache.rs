//! Last-issued-wins cache for page queries.
//!
//! A page calls [`QueryCache::begin`] before sending a request and
//! [`QueryCache::complete`] with the result. If another request for the same
//! key was started in between, the older result is dropped.
//! [`QueryCache::is_latest`] tells whether a ticket is still the most recent
//! query across all keys, i.e. the one a page is currently showing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle for one in-flight query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    key: String,
    generation: u64,
    sequence: u64,
}

impl QueryTicket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug)]
struct Entry<V> {
    latest: u64,
    pending: bool,
    value: Option<V>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            latest: 0,
            pending: false,
            value: None,
        }
    }
}

#[derive(Debug)]
pub struct QueryCache<V> {
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
    /// Tickets issued over all keys
    issued: Arc<AtomicU64>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            issued: Arc::clone(&self.issued),
        }
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a query, superseding any earlier one for `key`
    pub fn begin(&self, key: impl Into<String>) -> QueryTicket {
        let key = key.into();
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_default();
        entry.latest += 1;
        entry.pending = true;
        QueryTicket {
            key,
            generation: entry.latest,
            sequence: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// No query for any key was begun after `ticket`
    pub fn is_latest(&self, ticket: &QueryTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.sequence
    }

    /// Store a result. Returns `false` if the ticket was superseded or the
    /// key invalidated meanwhile, in which case the value is discarded.
    pub fn complete(&self, ticket: &QueryTicket, value: V) -> bool {
        let mut entries = self.write();
        match entries.get_mut(&ticket.key) {
            Some(entry) if entry.latest == ticket.generation && entry.pending => {
                entry.value = Some(value);
                entry.pending = false;
                true
            }
            _ => {
                tracing::debug!(key = %ticket.key, "dropping superseded query result");
                false
            }
        }
    }

    /// Mark a query as finished without a value (request failed). Returns
    /// `false` if the ticket was already superseded.
    pub fn abandon(&self, ticket: &QueryTicket) -> bool {
        let mut entries = self.write();
        if let Some(entry) = entries.get_mut(&ticket.key)
            && entry.latest == ticket.generation
            && entry.pending
        {
            entry.pending = false;
            return true;
        }
        false
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.read();
        entries.get(key).and_then(|e| e.value.clone())
    }

    pub fn is_pending(&self, key: &str) -> bool {
        let entries = self.read();
        entries.get(key).is_some_and(|e| e.pending)
    }

    /// Forget the value and any in-flight query for `key`
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.write();
        if let Some(entry) = entries.get_mut(key) {
            entry.value = None;
            entry.pending = false;
            entry.latest += 1;
        }
    }

    /// Invalidate every key starting with `prefix` (e.g. `"employees"`)
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.write();
        for (_, entry) in entries.iter_mut().filter(|(k, _)| k.starts_with(prefix)) {
            entry.value = None;
            entry.pending = false;
            entry.latest += 1;
        }
    }
}
