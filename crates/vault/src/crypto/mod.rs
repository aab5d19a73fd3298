//! AES-256-GCM field encryption primitives and key derivation.
//!
//! This module is free of persistence and lifecycle dependencies. It provides
//! the low-level derive/encrypt/decrypt operations used by the record
//! lifecycle service.
//!
//! # Envelope format
//!
//! ```text
//! base64( nonce(12 bytes) || ciphertext+tag )
//! ```
//!
//! Standard base64 with padding. The first 12 decoded bytes are the AES-GCM
//! nonce; the remainder is the ciphertext plus the 16-byte authentication
//! tag. This layout is a persisted interop format and must not change.

pub mod cipher;
pub mod kdf;

pub use cipher::{CipherError, FieldCipher};
pub use kdf::{derive_key, KeyBytes, KEY_LEN};
