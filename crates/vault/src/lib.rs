//! `vault` — credential vault encryption-at-rest core.
//!
//! A host process wires the pieces together like this:
//!
//! 1. Load and validate [`config::VaultConfig`] from environment variables.
//! 2. Initialise logging via [`telemetry::init_logging`].
//! 3. Derive the symmetric key and build a [`crypto::FieldCipher`] from the
//!    configured secret (once, at startup).
//! 4. Construct a [`records::VaultService`] over a [`store::VaultStore`]
//!    backend and hand it authenticated requests.
//!
//! The password field of every record is encrypted on write and decrypted on
//! read; all store access is scoped to the authenticated owner.

pub mod config;
pub mod crypto;
pub mod records;
pub mod store;
pub mod telemetry;

pub use config::VaultConfig;
pub use crypto::FieldCipher;
pub use records::VaultService;
pub use store::{MemoryStore, VaultStore};
