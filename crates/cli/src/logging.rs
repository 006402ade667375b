//! Installation of the `tracing` subscriber for the CLI.
//!
//! The wrapper usually runs buried inside a build system, where its stderr is
//! either discarded or interleaved with everything else. Logging can therefore
//! be sent to a file instead, which is appended to so that a whole build can be
//! inspected afterwards.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

/// The environment variable holding the log filter directives.
pub const LOG_FILTER_VAR: &str = "BITCC_LOG";

/// The environment variable naming a file to append the log to.
pub const LOG_FILE_VAR: &str = "BITCC_LOG_FILE";

/// The filter used when [`LOG_FILTER_VAR`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber, configured from the environment.
///
/// # Errors
///
/// - If the log file cannot be opened for appending.
/// - If a global subscriber has already been installed.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => subscriber.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

fn log_file() -> Option<PathBuf> {
    std::env::var_os(LOG_FILE_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
