//! Derivation of the 32-byte AES-256 key from the configured secret.
//!
//! The derivation is deterministic: the same secret always yields the same
//! key, so envelopes written by earlier deployments stay decryptable. The
//! salt and iteration count below are part of that persisted contract and
//! must not change.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::warn;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Static, non-secret salt. Fixed by the deployed data format.
pub const KDF_SALT: &[u8] = b"password_manager_salt";

/// PBKDF2-HMAC-SHA256 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which key material lives in RAM.
#[derive(Clone)]
pub struct KeyBytes(pub(crate) Box<[u8; KEY_LEN]>);

impl Drop for KeyBytes {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("KeyBytes([REDACTED])")
    }
}

/// Derive the 32-byte encryption key from the configured secret.
///
/// A secret of exactly [`KEY_LEN`] bytes is used verbatim. **Known
/// weakness:** this fast path skips key stretching entirely, so a 32-byte
/// low-entropy secret gets no brute-force hardening; it is kept only for
/// compatibility with existing stored data, and taking it emits a warning.
///
/// Any other length is stretched with PBKDF2-HMAC-SHA256 over [`KDF_SALT`]
/// for [`KDF_ITERATIONS`] rounds.
pub fn derive_key(secret: &[u8]) -> KeyBytes {
    let mut key = Box::new([0u8; KEY_LEN]);

    if secret.len() == KEY_LEN {
        warn!("configured secret is exactly 32 bytes and is used verbatim; key stretching skipped");
        key.copy_from_slice(secret);
    } else {
        pbkdf2_hmac::<Sha256>(secret, KDF_SALT, KDF_ITERATIONS, &mut key[..]);
    }

    KeyBytes(key)
}
