//! Document store
//!
//! The engine loads and saves records through [`DocumentStore`].
//! [`InMemoryDocumentStore`] is the reference backend.

use crate::error::StoreError;
use parking_lot::RwLock;
use rights_model::{Record, RecordId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Persistent record storage
pub trait DocumentStore: Send + Sync {
    /// Load the current persisted record
    ///
    /// A record that was never saved comes back as a fresh record
    /// (`is_new() == true`, version 0).
    ///
    /// # Errors
    /// Returns error if the backend fails
    fn load(&self, id: &RecordId) -> Result<Arc<Record>, StoreError>;

    /// Persist a record and return its new version
    ///
    /// # Errors
    /// Returns [`StoreError::Conflict`] if the record changed since the
    /// caller loaded it
    fn save(&self, record: Record) -> Result<u64, StoreError>;

    /// Check if a persisted version exists
    ///
    /// # Errors
    /// Returns error if the backend fails
    fn exists(&self, id: &RecordId) -> Result<bool, StoreError>;
}

/// In-memory store with optimistic version checks
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<RecordId, Arc<Record>>>,
    saves: AtomicUsize,
}

impl InMemoryDocumentStore {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves since creation
    #[inline]
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of persisted records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Current persisted snapshot, without the fresh-record fallback
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<Arc<Record>> {
        self.records.read().get(id).cloned()
    }

    /// Delete a persisted record
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing is stored under `id`
    pub fn remove(&self, id: &RecordId) -> Result<Arc<Record>, StoreError> {
        self.records
            .write()
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, id: &RecordId) -> Result<Arc<Record>, StoreError> {
        let existing = self.records.read().get(id).cloned();
        Ok(existing.unwrap_or_else(|| Arc::new(Record::new(id.clone()))))
    }

    fn save(&self, mut record: Record) -> Result<u64, StoreError> {
        let mut records = self.records.write();
        let actual = records.get(record.id()).map_or(0, |stored| stored.version());
        if record.version() != actual {
            return Err(StoreError::Conflict {
                record: record.id().clone(),
                expected: record.version(),
                actual,
            });
        }

        let version = actual + 1;
        record.mark_persisted(version);
        records.insert(record.id().clone(), Arc::new(record));
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(version)
    }

    fn exists(&self, id: &RecordId) -> Result<bool, StoreError> {
        Ok(self.records.read().contains_key(id))
    }
}
