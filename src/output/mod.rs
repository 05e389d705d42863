//! Output module for reporting on stored data
//!
//! This module handles:
//! - Loading aggregate statistics from the store
//! - Printing them for the `--stats` mode

pub mod stats;

pub use stats::{load_statistics, print_statistics, LossStatistics};
