//! Persistence interface for vault records.
//!
//! The lifecycle service only sees this trait; the backing storage (SQL,
//! key-value, in-memory) is a host concern. Every operation is scoped by the
//! owner identity, and an owner mismatch is indistinguishable from absence —
//! callers learn nothing about records they do not own.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use common::record::{StoredPatch, StoredRecord};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to execute the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Owner-scoped storage for [`StoredRecord`]s.
///
/// Password fields pass through this interface only as ciphertext envelopes;
/// implementations never see plaintext.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Persist a new record and return it as stored.
    async fn insert(&self, record: StoredRecord) -> Result<StoredRecord, StoreError>;

    /// Fetch a single record, or `None` if it does not exist for this owner.
    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Option<StoredRecord>, StoreError>;

    /// Fetch all records belonging to `owner`.
    async fn fetch_all(&self, owner: Uuid) -> Result<Vec<StoredRecord>, StoreError>;

    /// Apply a partial update atomically and return the updated record, or
    /// `None` if it does not exist for this owner. Fields absent from the
    /// patch are left untouched.
    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: StoredPatch,
    ) -> Result<Option<StoredRecord>, StoreError>;

    /// Permanently delete a record. Returns `true` if a record was removed.
    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;
}
