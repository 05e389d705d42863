//! Storage module for persisting daily loss records
//!
//! This module handles all database operations, including:
//! - SQLite database opening and schema management
//! - Reading the dates that are already stored
//! - Insert-if-absent bulk writes of new records
//! - Aggregate reads for statistics

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, TABLE_NAME};
pub use sqlite::SqliteStore;
pub use traits::{LossStore, StorageError, StorageResult};

use crate::AirLossError;

use std::path::Path;

/// Opens a store and makes sure its schema exists
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Store ready for reads and writes
/// * `Err(AirLossError)` - Failed to open the file or create the table
pub fn open_storage(path: &Path) -> Result<SqliteStore, AirLossError> {
    let mut store = SqliteStore::new(path)?;
    store.ensure_schema()?;
    Ok(store)
}

/// Per-category sums over every stored day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LossTotals {
    pub planes: u64,
    pub helicopters: u64,
    pub uav: u64,
    pub cruise_missiles: u64,
    pub ballistic_missiles: u64,
}
