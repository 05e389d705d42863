//! Database schema definitions
//!
//! This module contains the SQL schema for the Air-Losses database.

/// Name of the single table holding daily records
pub const TABLE_NAME: &str = "air_losses";

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per report date
CREATE TABLE IF NOT EXISTS air_losses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    report_date DATE UNIQUE,
    planes INTEGER DEFAULT 0,
    helicopters INTEGER DEFAULT 0,
    uav INTEGER DEFAULT 0,
    cruise_missiles INTEGER DEFAULT 0,
    ballistic_missiles INTEGER DEFAULT 0
);
"#;

/// Initializes the database schema
///
/// Safe to call on every run; existing tables are left untouched.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
