//! Logging infrastructure for creditprep.
//!
//! One tracing subscriber is installed at startup and lives for the duration
//! of a single pipeline run; library code only emits events and never touches
//! the subscriber. The level defaults to `info` and can be overridden with
//! `RUST_LOG`.
//!
//! ```no_run
//! use creditprep::logging;
//!
//! logging::init().expect("Failed to initialize logging");
//! tracing::info!("run started");
//! ```

use anyhow::{Context as _, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initializes the logging system with console output.
///
/// # Errors
///
/// Returns error if the `RUST_LOG` filter cannot be parsed or a subscriber
/// is already installed.
pub fn init() -> Result<()> {
    // Default to INFO, allow override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
