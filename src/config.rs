// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID for the shared hub store. `None` means offline:
    /// schedule data stays on the local store and live sessions are
    /// unavailable.
    pub gcp_project_id: Option<String>,
    /// Directory for the local JSON store.
    pub data_dir: PathBuf,
    /// How often the Firestore adapter re-queries watched collections.
    pub poll_interval: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            gcp_project_id: None,
            data_dir: PathBuf::from("data"),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GCP_PROJECT_ID` is optional: without it the app runs against local
    /// storage only. For local development against the Firestore emulator,
    /// set `FIRESTORE_EMULATOR_HOST` as well.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let poll_interval_secs: u64 = match env::var("HUB_POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("HUB_POLL_INTERVAL_SECS"))?,
            Err(_) => 5,
        };
        if poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("HUB_POLL_INTERVAL_SECS"));
        }

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").ok().filter(|v| !v.is_empty()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
