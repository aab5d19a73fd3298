//! Common record types and errors shared across `vault-core` crates.

pub mod error;
pub mod record;

pub use error::VaultError;
