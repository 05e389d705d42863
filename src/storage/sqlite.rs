//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the LossStore trait.

use crate::record::{DailyLossRecord, KnownDates};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{LossStore, StorageResult};
use crate::storage::LossTotals;
use crate::AirLossError;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Format of `report_date` values in the database
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file
    ///
    /// The schema is not created here; call [`LossStore::ensure_schema`].
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(AirLossError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, AirLossError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, AirLossError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Reads every stored date that parses, skipping malformed rows
    fn stored_dates(&self) -> StorageResult<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare("SELECT report_date FROM air_losses")?;

        let rows = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let dates = rows
            .into_iter()
            .flatten()
            .filter_map(|value| match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!("Ignoring stored row with invalid date '{}'", value);
                    None
                }
            })
            .collect();

        Ok(dates)
    }
}

impl LossStore for SqliteStore {
    fn ensure_schema(&mut self) -> StorageResult<()> {
        initialize_schema(&self.conn)?;
        Ok(())
    }

    fn load_dates(&self) -> StorageResult<KnownDates> {
        Ok(self.stored_dates()?.into_iter().collect())
    }

    fn insert_new(&mut self, records: &[DailyLossRecord]) -> StorageResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO air_losses
                 (report_date, planes, helicopters, uav, cruise_missiles, ballistic_missiles)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for record in records {
                inserted += stmt.execute(params![
                    record.date_key(),
                    record.planes,
                    record.helicopters,
                    record.uav,
                    record.cruise_missiles,
                    record.ballistic_missiles,
                ])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    // ===== Statistics =====

    fn count_days(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM air_losses", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn date_range(&self) -> StorageResult<Option<(NaiveDate, NaiveDate)>> {
        let dates = self.stored_dates()?;

        match (dates.iter().min(), dates.iter().max()) {
            (Some(first), Some(last)) => Ok(Some((*first, *last))),
            _ => Ok(None),
        }
    }

    fn totals(&self) -> StorageResult<LossTotals> {
        let totals = self.conn.query_row(
            "SELECT COALESCE(SUM(planes), 0), COALESCE(SUM(helicopters), 0),
                    COALESCE(SUM(uav), 0), COALESCE(SUM(cruise_missiles), 0),
                    COALESCE(SUM(ballistic_missiles), 0)
             FROM air_losses",
            [],
            |row| {
                Ok(LossTotals {
                    planes: row.get::<_, i64>(0)? as u64,
                    helicopters: row.get::<_, i64>(1)? as u64,
                    uav: row.get::<_, i64>(2)? as u64,
                    cruise_missiles: row.get::<_, i64>(3)? as u64,
                    ballistic_missiles: row.get::<_, i64>(4)? as u64,
                })
            },
        )?;
        Ok(totals)
    }

    fn get_record(&self, date: NaiveDate) -> StorageResult<Option<DailyLossRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT planes, helicopters, uav, cruise_missiles, ballistic_missiles
                 FROM air_losses WHERE report_date = ?1",
                params![date.format(DATE_FORMAT).to_string()],
                |row| {
                    Ok(DailyLossRecord {
                        report_date: date,
                        planes: row.get(0)?,
                        helicopters: row.get(1)?,
                        uav: row.get(2)?,
                        cruise_missiles: row.get(3)?,
                        ballistic_missiles: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }
}
