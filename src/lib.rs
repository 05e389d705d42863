//! Air-Losses: a daily air-defence loss tracker
//!
//! This crate scrapes the public casualties listing (the main page plus the
//! monthly archive pages linked from it), extracts per-day counts for planes,
//! helicopters, UAVs, cruise missiles and ballistic missiles, and stores new
//! days in a local SQLite database. Days that are already stored are skipped.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod storage;

use thiserror::Error;

/// Main error type for Air-Losses operations
#[derive(Debug, Error)]
pub enum AirLossError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Air-Losses operations
pub type Result<T> = std::result::Result<T, AirLossError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{DailyLossRecord, KnownDates, LossCategory};
