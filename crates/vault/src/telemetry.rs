//! Structured logging initialisation.
//!
//! # Logging invariants
//!
//! - **No plaintext or key material** must appear in any log field; error
//!   types and `Debug` impls in this workspace redact sensitive values so
//!   ordinary `%err`-style fields stay safe.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), with
//!   `RUST_LOG` taking precedence when set.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber with a JSON fmt layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
