//! Client configuration
//!
//! Constants for persisted storage and polling, plus the resolved runtime
//! configuration built from CLI flags and their environment fallbacks.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ===== Backend =====

/// Base address used when neither `--api-url` nor `TICKETDESK_API_URL` is set
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

// ===== Local storage =====

/// Directory name created under `$HOME` for client state
pub const DATA_DIR_NAME: &str = ".ticketdesk";
/// SQLite file holding the persisted key/value entries
pub const STORAGE_FILE: &str = "storage.db";
/// Key of the persisted bearer token
pub const TOKEN_KEY: &str = "token";
/// Key of the persisted, JSON-serialized user record
pub const USER_KEY: &str = "user";

// ===== Session hydration poll =====

/// Default interval between storage checks while waiting for a login
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
/// Lower bound; faster polling only burns CPU on SQLite reads
pub const MIN_POLL_INTERVAL_MS: u64 = 250;
/// Upper bound (one minute)
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Clamp a requested poll interval into the supported range.
pub fn poll_interval(requested_ms: u64) -> Duration {
    Duration::from_millis(requested_ms.clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub poll_interval: Duration,
    pub log_json: bool,
    pub verbose: u8,
}

impl Config {
    pub fn resolve(
        api_url: Option<String>,
        data_dir: Option<PathBuf>,
        poll_ms: Option<u64>,
        log_json: bool,
        verbose: u8,
    ) -> Self {
        Config {
            api_url: api_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            poll_interval: poll_interval(poll_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)),
            log_json,
            verbose,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(DATA_DIR_NAME),
        _ => PathBuf::from(DATA_DIR_NAME),
    }
}
