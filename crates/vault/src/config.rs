//! Configuration loading and validation for the vault core.
//!
//! All values are read from environment variables at startup. The process
//! must refuse to start if the encryption secret is missing or empty — a
//! silently substituted default key would make every stored envelope
//! unrecoverable the moment the real secret is configured.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Substrings that mark an encryption secret as a shipped placeholder.
const PLACEHOLDER_MARKERS: &[&str] = &["change-this", "changeme", "change_me"];

/// Validated vault configuration.
#[derive(Clone, Deserialize)]
pub struct VaultConfig {
    /// Secret from which the AES-256 key is derived. **Required.**
    pub encryption_key: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The configured secret must never appear in logs or error output.
        f.debug_struct("VaultConfig")
            .field("encryption_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn default_log_level() -> String {
    "info".into()
}

impl VaultConfig {
    /// Load and validate configuration from environment variables
    /// (`ENCRYPTION_KEY`, `LOG_LEVEL`).
    ///
    /// # Errors
    ///
    /// Returns an error if `ENCRYPTION_KEY` is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: VaultConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration (is ENCRYPTION_KEY set?)")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    ///
    /// A placeholder-looking secret is a security misconfiguration, not a
    /// functional error: it produces a startup warning rather than a refusal.
    fn validate(&self) -> Result<()> {
        if self.encryption_key.trim().is_empty() {
            anyhow::bail!("ENCRYPTION_KEY is required and must not be empty");
        }
        if self.secret_looks_like_placeholder() {
            warn!("ENCRYPTION_KEY looks like a shipped placeholder; set a real secret in production");
        }
        Ok(())
    }

    fn secret_looks_like_placeholder(&self) -> bool {
        let lowered = self.encryption_key.to_lowercase();
        PLACEHOLDER_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }
}
