//! Log file setup
//!
//! The terminal belongs to the TUI, so log output goes to a file. The filter
//! comes from the `CRABBY_LOG` environment variable (same syntax as
//! `RUST_LOG`) and defaults to `info`.

use directories::ProjectDirs;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "CRABBY_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "crabby.log";

/// Error types for logging setup
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not install the log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Returns the default log file location in the user's cache directory,
/// falling back to the system temp directory when no home is known
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "crabby")
        .map(|dirs| dirs.cache_dir().join(LOG_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating it and its parent directories
fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open = || -> io::Result<File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };

    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Installs the global tracing subscriber writing to `path`.
///
/// # Arguments
/// * `path` - Log file; created if missing, appended to otherwise
///
/// # Returns
/// * `Ok(())` once the subscriber is installed
/// * `Err(LoggingError)` if the file cannot be opened or a subscriber is
///   already installed
pub fn init(path: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}
