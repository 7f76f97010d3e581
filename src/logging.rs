//! Log setup for the binary.
//!
//! The terminal belongs to the game, so logs only go to a file, and only when
//! `BLOCKTRIS_LOG_PATH` is set.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, DEFAULT_LOG_FILTER};

/// Filter from a directive string, falling back to the default on bad input
pub fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Returns false when logging stays off.
pub fn init(settings: &Settings) -> Result<bool> {
    let Some(path) = settings.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(&settings.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;

    Ok(true)
}
