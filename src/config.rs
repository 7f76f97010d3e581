//! Host settings, read from `BLOCKTRIS_*` environment variables.
//!
//! Unset or unparsable values fall back to the defaults.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::DEFAULT_HIGHSCORE_PATH;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub highscore_path: PathBuf,
    /// Fixed RNG seed; `None` picks one from the clock
    pub seed: Option<u32>,
    /// Play the line clear animation before removing rows
    pub animations: bool,
    /// File to write logs to; no logging without it
    pub log_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_PATH),
            seed: None,
            animations: true,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = non_empty("BLOCKTRIS_HIGHSCORE_PATH") {
            settings.highscore_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty("BLOCKTRIS_SEED") {
            settings.seed = v.parse().ok();
        }
        if let Some(v) = non_empty("BLOCKTRIS_ANIMATIONS") {
            settings.animations = parse_flag(&v).unwrap_or(true);
        }
        if let Some(v) = non_empty("BLOCKTRIS_LOG_PATH") {
            settings.log_path = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("BLOCKTRIS_LOG") {
            settings.log_filter = v;
        }

        settings
    }

    /// The configured seed, or one derived from the clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
