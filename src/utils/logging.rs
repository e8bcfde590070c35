//! Logging initialization
//!
//! Console logging via `tracing` with an env-filter override, plus an optional
//! file writer for long-running harvest jobs. Library code never installs a
//! subscriber; only binaries call into this module.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::utils::error::Result;

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize console logging.
///
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .init();
}

/// Initialize logging to a file instead of the console.
///
/// The file is created if missing and appended to otherwise.
pub fn init_with_file(verbose: bool, log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
