//! Database migrations
//!
//! Manages database schema versioning. The schema is embedded here for
//! runtime execution; a `schema_version` table tracks what has run.
//!
//! ## Rollback Strategy
//!
//! Rollbacks are manual - if a migration fails:
//! 1. Check the error message for details
//! 2. Fix the underlying issue
//! 3. Manually repair the database if needed
//! 4. Re-run migrations
//!
//! ## Adding New Migrations
//!
//! 1. Increment the `SCHEMA_VERSION` constant
//! 2. Add a new `migrate_vX` function
//! 3. Update `run_migrations` to call the new function

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(
                    version = 1,
                    error = %e,
                    "Migration V001 (initial schema) failed"
                );
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    // Create schema_version table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// V001: initial schema - cities, train companies, blacklist
///
/// `cities` is keyed by the normalized name; `display_name` keeps the
/// spelling the city was first resolved under. The blacklist's composite
/// primary key gives `INSERT OR IGNORE` its atomic insert-if-absent
/// semantics.
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS cities (
            name TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            station_id TEXT,
            station_name TEXT
        );

        CREATE TABLE IF NOT EXISTS train_companies (
            country TEXT PRIMARY KEY,
            url TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS blacklist (
            from_city TEXT NOT NULL,
            to_city TEXT NOT NULL,
            PRIMARY KEY (from_city, to_city)
        );
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_memory() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn migrations_run_from_scratch() {
        let conn = open_memory();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_rerunnable() {
        let conn = open_memory();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn migration_creates_all_tables() {
        let conn = open_memory();
        run_migrations(&conn).unwrap();

        for table in ["cities", "train_companies", "blacklist"] {
            let count: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "table {table} missing");
        }
    }
}
