//! Configuration module for Air-Losses
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file path means built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use air_losses::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("air-losses.toml")).unwrap();
//! println!("Main page: {}", config.source.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, SourceConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
