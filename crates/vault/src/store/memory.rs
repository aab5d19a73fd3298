//! [`MemoryStore`]: in-memory [`VaultStore`] backend.
//!
//! Suitable for tests and single-process use. Cloning is cheap and all clones
//! share the same underlying map.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::record::{StoredPatch, StoredRecord};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, VaultStore};

/// Thread-safe in-memory record store.
///
/// Reads take a shared lock; `insert`/`update`/`delete` take the write lock,
/// so a record's read-modify-write update is atomic with respect to that
/// record.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Uuid, StoredRecord>>>,
}

impl MemoryStore {
    /// Create a new, empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, across all owners.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns `true` if no records are held.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl VaultStore for MemoryStore {
    async fn insert(&self, record: StoredRecord) -> Result<StoredRecord, StoreError> {
        let mut map = self.inner.write().await;
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Option<StoredRecord>, StoreError> {
        let map = self.inner.read().await;
        Ok(map
            .get(&id)
            .filter(|record| record.owner_id == owner)
            .cloned())
    }

    async fn fetch_all(&self, owner: Uuid) -> Result<Vec<StoredRecord>, StoreError> {
        let map = self.inner.read().await;
        let mut records: Vec<StoredRecord> = map
            .values()
            .filter(|record| record.owner_id == owner)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: StoredPatch,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let mut map = self.inner.write().await;
        let Some(record) = map.get_mut(&id).filter(|record| record.owner_id == owner) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(username) = patch.username {
            record.username = username;
        }
        if let Some(envelope) = patch.password_envelope {
            record.password_envelope = envelope;
        }
        if let Some(url) = patch.url {
            record.url = Some(url);
        }
        if let Some(notes) = patch.notes {
            record.notes = Some(notes);
        }
        record.updated_at = Some(Utc::now());

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut map = self.inner.write().await;
        match map.get(&id) {
            Some(record) if record.owner_id == owner => {
                map.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
