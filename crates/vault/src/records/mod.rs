//! Vault record lifecycle: encrypt-on-write, decrypt-on-read, owner scoping.
//!
//! [`VaultService`] is thin orchestration over the [`FieldCipher`] and a
//! [`VaultStore`] backend. The password field is encrypted before any record
//! reaches the store and decrypted after retrieval; every store call is
//! scoped to the authenticated owner, and a record owned by someone else is
//! reported as [`VaultError::NotFound`] — never as a distinct "forbidden"
//! condition that would leak its existence.

use chrono::Utc;
use common::record::{RecordDraft, RecordPatch, RecordView, StoredPatch, StoredRecord};
use common::VaultError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::crypto::cipher::FieldCipher;
use crate::store::{StoreError, VaultStore};

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        VaultError::Storage(err.to_string())
    }
}

/// Owner-scoped CRUD over encrypted vault records.
pub struct VaultService<S> {
    cipher: FieldCipher,
    store: S,
}

impl<S: VaultStore> VaultService<S> {
    /// Create a service over the given cipher and persistence backend.
    pub fn new(cipher: FieldCipher, store: S) -> Self {
        Self { cipher, store }
    }

    /// Create a record for `owner`. The persisted password is the ciphertext
    /// envelope; the returned view carries the original plaintext.
    pub async fn create(&self, owner: Uuid, draft: RecordDraft) -> Result<RecordView, VaultError> {
        let envelope = self
            .cipher
            .encrypt(&draft.password)
            .map_err(|_| VaultError::Encryption)?;

        let record = StoredRecord {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: draft.title,
            username: draft.username,
            password_envelope: envelope,
            url: draft.url,
            notes: draft.notes,
            created_at: Utc::now(),
            updated_at: None,
        };

        let stored = self.store.insert(record).await?;
        debug!(record_id = %stored.id, "vault record created");
        Ok(stored.into_view(draft.password))
    }

    /// Fetch a single record for `owner`, decrypting the password field.
    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<RecordView, VaultError> {
        let stored = self
            .store
            .fetch(id, owner)
            .await?
            .ok_or(VaultError::NotFound)?;
        self.decrypt_to_view(stored)
    }

    /// Fetch all of `owner`'s records, decrypting each password field.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<RecordView>, VaultError> {
        let stored = self.store.fetch_all(owner).await?;
        stored
            .into_iter()
            .map(|record| self.decrypt_to_view(record))
            .collect()
    }

    /// Apply a partial update to a record owned by `owner`. Only fields
    /// present in the patch change; a present password is re-encrypted under
    /// a fresh nonce before persistence.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: RecordPatch,
    ) -> Result<RecordView, VaultError> {
        let password_envelope = match &patch.password {
            Some(password) => Some(
                self.cipher
                    .encrypt(password)
                    .map_err(|_| VaultError::Encryption)?,
            ),
            None => None,
        };

        let stored_patch = StoredPatch {
            title: patch.title,
            username: patch.username,
            password_envelope,
            url: patch.url,
            notes: patch.notes,
        };

        let updated = self
            .store
            .update(id, owner, stored_patch)
            .await?
            .ok_or(VaultError::NotFound)?;
        debug!(record_id = %updated.id, "vault record updated");
        self.decrypt_to_view(updated)
    }

    /// Permanently delete a record owned by `owner`.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), VaultError> {
        if self.store.delete(id, owner).await? {
            debug!(record_id = %id, "vault record deleted");
            Ok(())
        } else {
            Err(VaultError::NotFound)
        }
    }

    /// Decrypt a stored record's envelope and map it to the response shape.
    ///
    /// A decrypt failure on stored data means key mismatch or corruption; it
    /// surfaces as [`VaultError::Integrity`] and is never replaced by
    /// fallback or partial plaintext.
    fn decrypt_to_view(&self, stored: StoredRecord) -> Result<RecordView, VaultError> {
        match self.cipher.decrypt(&stored.password_envelope) {
            Ok(plaintext) => Ok(stored.into_view(plaintext)),
            Err(err) => {
                warn!(record_id = %stored.id, error = %err, "stored envelope failed to decrypt");
                Err(VaultError::Integrity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::{NONCE_LEN, TAG_LEN};
    use crate::store::MemoryStore;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn service() -> (VaultService<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let cipher = FieldCipher::from_secret(b"test-configured-secret");
        (VaultService::new(cipher, store.clone()), store)
    }

    fn bank_draft() -> RecordDraft {
        RecordDraft {
            title: "Bank".into(),
            username: "alice".into(),
            password: "S3cr3t!".into(),
            url: Some("bank.com".into()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_persists_envelope_and_returns_plaintext() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let view = service.create(owner, bank_draft()).await.unwrap();
        assert_eq!(view.password, "S3cr3t!");

        // What the store holds is a base64 envelope, not the plaintext.
        let stored = store.fetch(view.id, owner).await.unwrap().unwrap();
        assert_ne!(stored.password_envelope, "S3cr3t!");
        let decoded = STANDARD.decode(&stored.password_envelope).unwrap();
        assert!(decoded.len() >= NONCE_LEN + TAG_LEN);
    }

    #[tokio::test]
    async fn read_back_decrypts_for_owner_only() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();

        let read = service.get(owner, created.id).await.unwrap();
        assert_eq!(read.password, "S3cr3t!");
        assert_eq!(read.title, "Bank");

        // A foreign owner gets NotFound, not a permission error.
        assert!(matches!(
            service.get(stranger, created.id).await,
            Err(VaultError::NotFound)
        ));
    }

    #[tokio::test]
    async fn list_returns_only_own_records_decrypted() {
        let (service, _) = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.create(alice, bank_draft()).await.unwrap();
        let mut other = bank_draft();
        other.title = "Email".into();
        other.password = "other-pass".into();
        service.create(alice, other).await.unwrap();
        service.create(bob, bank_draft()).await.unwrap();

        let records = service.list(alice).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.password == "S3cr3t!"));
        assert!(records.iter().any(|r| r.password == "other-pass"));
    }

    #[tokio::test]
    async fn url_only_update_leaves_envelope_byte_identical() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();
        let before = store.fetch(created.id, owner).await.unwrap().unwrap();

        let patch = RecordPatch {
            url: Some("bank.example".into()),
            ..Default::default()
        };
        let updated = service.update(owner, created.id, patch).await.unwrap();
        assert_eq!(updated.url.as_deref(), Some("bank.example"));
        assert_eq!(updated.password, "S3cr3t!");

        let after = store.fetch(created.id, owner).await.unwrap().unwrap();
        assert_eq!(after.password_envelope, before.password_envelope);
    }

    #[tokio::test]
    async fn password_update_re_encrypts_under_fresh_nonce() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();
        let before = store.fetch(created.id, owner).await.unwrap().unwrap();

        let patch = RecordPatch {
            password: Some("N3wPass".into()),
            ..Default::default()
        };
        let updated = service.update(owner, created.id, patch).await.unwrap();
        assert_eq!(updated.password, "N3wPass");

        let after = store.fetch(created.id, owner).await.unwrap().unwrap();
        assert_ne!(after.password_envelope, before.password_envelope);
        assert_eq!(service.get(owner, created.id).await.unwrap().password, "N3wPass");
    }

    #[tokio::test]
    async fn update_and_delete_by_foreign_owner_are_not_found() {
        let (service, store) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();

        let patch = RecordPatch {
            title: Some("hijacked".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(stranger, created.id, patch).await,
            Err(VaultError::NotFound)
        ));
        assert!(matches!(
            service.delete(stranger, created.id).await,
            Err(VaultError::NotFound)
        ));
        // Still present and intact for the real owner.
        assert!(store.fetch(created.id, owner).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();
        service.delete(owner, created.id).await.unwrap();

        assert!(store.is_empty().await);
        assert!(matches!(
            service.get(owner, created.id).await,
            Err(VaultError::NotFound)
        ));
        assert!(matches!(
            service.delete(owner, created.id).await,
            Err(VaultError::NotFound)
        ));
    }

    #[tokio::test]
    async fn empty_password_stores_empty_envelope() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let mut draft = bank_draft();
        draft.password = String::new();
        let created = service.create(owner, draft).await.unwrap();

        let stored = store.fetch(created.id, owner).await.unwrap().unwrap();
        assert_eq!(stored.password_envelope, "");
        assert_eq!(service.get(owner, created.id).await.unwrap().password, "");
    }

    #[tokio::test]
    async fn corrupted_envelope_surfaces_integrity_error() {
        let (service, store) = service();
        let owner = Uuid::new_v4();

        let created = service.create(owner, bank_draft()).await.unwrap();
        let mut stored = store.fetch(created.id, owner).await.unwrap().unwrap();

        // Corrupt the stored envelope behind the service's back.
        let mut bytes = STANDARD.decode(&stored.password_envelope).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        stored.password_envelope = STANDARD.encode(&bytes);
        store.insert(stored).await.unwrap();

        assert!(matches!(
            service.get(owner, created.id).await,
            Err(VaultError::Integrity)
        ));
        assert!(matches!(
            service.list(owner).await,
            Err(VaultError::Integrity)
        ));
    }

    #[tokio::test]
    async fn wrong_key_on_stored_data_surfaces_integrity_error() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let writer = VaultService::new(FieldCipher::from_secret(b"key-one"), store.clone());
        let created = writer.create(owner, bank_draft()).await.unwrap();

        // Same store, different configured secret — key mismatch.
        let reader = VaultService::new(FieldCipher::from_secret(b"key-two"), store);
        assert!(matches!(
            reader.get(owner, created.id).await,
            Err(VaultError::Integrity)
        ));
    }
}
