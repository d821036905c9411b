//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Default cap on photos per ingest batch, matching the upload surface.
pub const DEFAULT_MAX_INGEST_PHOTOS: usize = 200;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    // === Ingest Parameters ===
    /// Maximum photos accepted per ingest batch.
    #[serde(default = "default_max_ingest_photos")]
    pub max_ingest_photos: usize,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_ingest_photos() -> usize {
    DEFAULT_MAX_INGEST_PHOTOS
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::error::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.max_ingest_photos == 0 {
            return Err("MAX_INGEST_PHOTOS must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
            max_ingest_photos: default_max_ingest_photos(),
        }
    }
}
