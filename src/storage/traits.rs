//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::record::{DailyLossRecord, KnownDates};
use crate::storage::LossTotals;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The crawler touches the store twice per run: once to read the dates
/// already present, once to write the new batch.
pub trait LossStore {
    /// Creates the records table if it does not exist yet
    fn ensure_schema(&mut self) -> StorageResult<()>;

    /// Reads every stored report date
    ///
    /// Fails if the table is missing. Rows whose date cannot be parsed are
    /// skipped with a warning.
    fn load_dates(&self) -> StorageResult<KnownDates>;

    /// Reads every stored report date, treating an unreadable store as empty
    fn existing_dates(&self) -> KnownDates {
        match self.load_dates() {
            Ok(dates) => dates,
            Err(e) => {
                tracing::warn!("Could not read stored dates, starting from none: {}", e);
                KnownDates::new()
            }
        }
    }

    /// Inserts records whose date is not stored yet
    ///
    /// All records are written in one transaction. Rows that collide with an
    /// existing date are ignored.
    ///
    /// # Returns
    ///
    /// The number of rows actually inserted
    fn insert_new(&mut self, records: &[DailyLossRecord]) -> StorageResult<usize>;

    // ===== Statistics =====

    /// Counts stored days
    fn count_days(&self) -> StorageResult<u64>;

    /// Earliest and latest stored dates, if any
    fn date_range(&self) -> StorageResult<Option<(NaiveDate, NaiveDate)>>;

    /// Sums every category over all stored days
    fn totals(&self) -> StorageResult<LossTotals>;

    /// Gets the record stored for a date
    fn get_record(&self, date: NaiveDate) -> StorageResult<Option<DailyLossRecord>>;
}
