//! Vault record shapes exchanged between the lifecycle service, the
//! persistence backend, and API consumers.
//!
//! The persisted shape ([`StoredRecord`]) and the response shape
//! ([`RecordView`]) are distinct types: the former always carries the
//! password as a ciphertext envelope, the latter always carries plaintext.
//! [`StoredRecord::into_view`] is the only conversion between the two, so a
//! record is never decrypted "in place" on the persisted shape.
//!
//! Only the password field is encrypted at rest. Title, username, URL, and
//! notes are stored as-is — this asymmetry matches the deployed data format
//! and is a deliberate scope boundary, not an oversight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Create / update inputs
// ---------------------------------------------------------------------------

/// Input for creating a vault record. The password is plaintext here; it is
/// encrypted before anything is persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Display title, e.g. `"Bank"`.
    pub title: String,
    /// Username for the stored credential (not the vault owner).
    pub username: String,
    /// Plaintext secret. May be empty.
    pub password: String,
    /// Optional site URL. Stored unencrypted.
    pub url: Option<String>,
    /// Optional free-form notes. Stored unencrypted.
    pub notes: Option<String>,
}

impl std::fmt::Debug for RecordDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the plaintext password — not even in debug builds.
        f.debug_struct("RecordDraft")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

/// Partial update for a vault record. Only `Some` fields are changed.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub username: Option<String>,
    /// New plaintext password, if the password is being changed.
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl RecordPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.url.is_none()
            && self.notes.is_none()
    }
}

impl std::fmt::Debug for RecordPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordPatch")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Persisted shape
// ---------------------------------------------------------------------------

/// A vault record as held by the persistence backend.
///
/// `password_envelope` is always a ciphertext envelope string (or `""` for an
/// empty password) — plaintext never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    /// Authenticated identity that owns this record. Every store operation
    /// is scoped by this field.
    pub owner_id: Uuid,
    pub title: String,
    pub username: String,
    /// Base64 envelope of `nonce || ciphertext+tag`.
    pub password_envelope: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredRecord {
    /// Map this persisted record to its response shape, substituting the
    /// decrypted plaintext into the password slot.
    pub fn into_view(self, password: String) -> RecordView {
        RecordView {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            username: self.username,
            password,
            url: self.url,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Persistence-side partial update. Shaped like [`RecordPatch`], except the
/// password slot already holds a ciphertext envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredPatch {
    pub title: Option<String>,
    pub username: Option<String>,
    /// Replacement envelope, already encrypted by the lifecycle service.
    pub password_envelope: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

/// A vault record as returned to the authenticated owner: the password slot
/// holds plaintext. This type only exists in transient response objects.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub username: String,
    /// Decrypted plaintext password.
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for RecordView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordView")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}
