//! SQLite-based connection blacklist

use std::sync::Arc;

use application::{error::ApplicationError, ports::BlacklistPort};
use async_trait::async_trait;
use rusqlite::params;
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based blacklist of directional city pairs
///
/// Entries never expire; the pair's composite primary key plus
/// `INSERT OR IGNORE` keeps inserts idempotent and atomic.
#[derive(Debug, Clone)]
pub struct SqliteBlacklistStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteBlacklistStore {
    /// Create a new SQLite blacklist store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlacklistPort for SqliteBlacklistStore {
    #[instrument(skip(self))]
    async fn contains(&self, from: &str, to: &str) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let from = from.to_string();
        let to = to.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let found: bool = conn
                .query_row(
                    "SELECT EXISTS(
                        SELECT 1 FROM blacklist WHERE from_city = ?1 AND to_city = ?2
                     )",
                    params![from, to],
                    |row| row.get(0),
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(found)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn insert(&self, from: &str, to: &str) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let from = from.to_string();
        let to = to.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT OR IGNORE INTO blacklist (from_city, to_city) VALUES (?1, ?2)",
                params![from, to],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Blacklisted pair");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
