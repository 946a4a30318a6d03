//! Bounded, most-recent-first review history.
//!
//! `HistoryStore` exclusively owns the ordered item sequence. Insertion
//! order IS recency — nothing here sorts by timestamp. Storage failures in
//! either direction are absorbed at this boundary: a corrupt or unreadable
//! record degrades to an empty history, a failed persist leaves a stale but
//! usable one, and neither ever interrupts the review flow.

use crate::storage::Storage;
use crate::types::ReviewHistoryItem;

/// How many past reviews are kept. Oldest entries beyond this are evicted.
pub const HISTORY_CAPACITY: usize = 10;

/// Capacity-bounded cache of past reviews over an injected [`Storage`].
pub struct HistoryStore {
    storage: Box<dyn Storage>,
    items: Vec<ReviewHistoryItem>,
    capacity: usize,
}

impl HistoryStore {
    /// Opens the store with the default capacity, loading whatever the
    /// storage currently holds.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        Self::with_capacity(storage, HISTORY_CAPACITY)
    }

    /// Opens the store with an explicit capacity.
    ///
    /// Never fails: an unreadable or corrupt record logs a warning and
    /// starts empty — stale history must not block the application. A
    /// record longer than `capacity` (written by an older run or tampered
    /// with) is truncated on load so the bound holds from the start.
    pub fn with_capacity(storage: Box<dyn Storage>, capacity: usize) -> Self {
        let mut items: Vec<ReviewHistoryItem> = match storage.read() {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(error) => {
                    tracing::warn!(%error, "history record is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "history storage unreadable, starting empty");
                Vec::new()
            }
        };
        items.truncate(capacity);

        Self {
            storage,
            items,
            capacity,
        }
    }

    /// All cached reviews, most recent first.
    pub fn items(&self) -> &[ReviewHistoryItem] {
        &self.items
    }

    /// Looks up a past review by id. Pure read.
    pub fn get(&self, id: &str) -> Option<&ReviewHistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepends `item`, evicts beyond capacity, persists the full snapshot.
    ///
    /// This is the sole mutation path besides [`clear`](Self::clear).
    /// Returns the new sequence.
    pub fn record(&mut self, item: ReviewHistoryItem) -> &[ReviewHistoryItem] {
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
        self.persist();
        &self.items
    }

    /// Drops every cached review and persists the empty sequence.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Serializes the current sequence and rewrites the durable record.
    /// Failures are logged and absorbed; the in-memory state stays valid.
    fn persist(&mut self) {
        let bytes = match serde_json::to_vec(&self.items) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize review history");
                return;
            }
        };
        if let Err(error) = self.storage.write(&bytes) {
            tracing::warn!(%error, "failed to persist review history");
        }
    }
}
