//! Common error types shared across crates.

use thiserror::Error;

/// Top-level vault error type.
///
/// Variants map to the conditions a caller can observe:
/// - [`VaultError::NotFound`] — record absent *or* owned by someone else;
///   the two cases are deliberately indistinguishable.
/// - [`VaultError::Integrity`] — a stored envelope failed authenticated
///   decryption (key mismatch or data corruption).
/// - [`VaultError::Encryption`] — encrypting a field failed.
/// - [`VaultError::Unauthorized`] — no valid authenticated identity.
/// - [`VaultError::Storage`] — the persistence backend failed.
///
/// None of the messages ever contain plaintext or key material.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The record does not exist for the requesting owner.
    #[error("record not found")]
    NotFound,

    /// The request carries no valid authenticated identity.
    #[error("unauthorized")]
    Unauthorized,

    /// A stored password envelope failed authenticated decryption.
    #[error("stored record failed integrity verification")]
    Integrity,

    /// Encrypting a field failed in the cipher layer.
    #[error("field encryption failed")]
    Encryption,

    /// The persistence backend reported a failure.
    #[error("storage error: {0}")]
    Storage(String),
}
