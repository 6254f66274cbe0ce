//! tracing setup for the `heroes` binary.
//!
//! Events go to an append-only file (`$XDG_STATE_HOME/heroes/heroes.log` unless a
//! path is given) so they never interleave with command output on the terminal.
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Library and binary at debug, everything else (libcurl glue, tokio) at info.
pub const DEFAULT_FILTER: &str = "info,heroes_core=debug,heroes=debug";

const LOG_FILE_NAME: &str = "heroes.log";

/// `RUST_LOG` when it parses, the default filter otherwise.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Default log file location, creating the state directory if needed.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("heroes").context("xdg base dirs")?;
    dirs.place_state_file(LOG_FILE_NAME)
        .context("create heroes state dir")
}

/// Logs to the default file. Returns the path so callers can mention it.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    init_logging_at(&path)?;
    Ok(path)
}

/// Logs to `path`, appending. Fails if the file cannot be opened or a global
/// subscriber is already installed; the caller then falls back to stderr.
pub fn init_logging_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "heroes logging initialized");
    Ok(())
}

/// Stderr-only logging for when no log file can be used.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
