//! AES-256-GCM encryption and decryption of individual string fields.
//!
//! Every call to [`FieldCipher::encrypt`] draws a fresh random 96-bit nonce
//! from the OS CSPRNG. Nonce reuse under a fixed key breaks GCM entirely, so
//! nonces are never cached, derived, or counted — only freshly generated.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::kdf::{self, KeyBytes};

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
///
/// Messages are safe to surface: they never contain plaintext or key bytes.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The envelope is not decodable base64 or is too short to contain a nonce.
    #[error("malformed ciphertext envelope")]
    InvalidEnvelope,

    /// Authentication failed: wrong key, or the envelope was tampered with.
    #[error("ciphertext envelope failed authentication")]
    AeadFailure,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted field is not valid UTF-8")]
    InvalidUtf8,
}

/// AES-256-GCM cipher over a single process-wide derived key.
///
/// Built once at startup and injected into every component that encrypts or
/// decrypts record fields. Immutable after construction, so it is safe to
/// share across arbitrarily many concurrent calls.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The inner cipher state is key material.
        f.write_str("FieldCipher([REDACTED])")
    }
}

impl FieldCipher {
    /// Build a cipher from an already-derived key.
    pub fn new(key: &KeyBytes) -> Self {
        let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(&key.0[..]));
        Self { cipher }
    }

    /// Derive the key from the configured secret and build the cipher.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(&kdf::derive_key(secret))
    }

    /// Encrypt a plaintext field into its envelope string.
    ///
    /// The empty string short-circuits to the empty string: empty fields are
    /// stored as-is, with no envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AeadFailure`] on an internal AEAD error
    /// (unreachable with a valid key and nonce).
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        // Use OsRng for a cryptographically secure random nonce.
        use aes_gcm::aead::rand_core::RngCore;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::AeadFailure)?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(envelope))
    }

    /// Decrypt an envelope string back to its plaintext field.
    ///
    /// The empty string short-circuits to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidEnvelope`] if the envelope is not base64
    /// or too short, [`CipherError::AeadFailure`] if the authentication tag
    /// does not verify (wrong key or tampered data), and
    /// [`CipherError::InvalidUtf8`] if the recovered bytes are not UTF-8.
    /// Never returns partial or unauthenticated plaintext.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CipherError> {
        if envelope.is_empty() {
            return Ok(String::new());
        }

        let bytes = STANDARD
            .decode(envelope)
            .map_err(|_| CipherError::InvalidEnvelope)?;
        if bytes.len() < NONCE_LEN {
            return Err(CipherError::InvalidEnvelope);
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CipherError::AeadFailure)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}
