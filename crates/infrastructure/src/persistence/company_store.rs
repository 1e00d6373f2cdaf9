//! SQLite-based train-company directory

use std::sync::Arc;

use application::{error::ApplicationError, ports::CompanyDirectoryPort};
use async_trait::async_trait;
use domain::entities::TrainCompany;
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based train-company directory
///
/// Lookup is exact and case-sensitive on the stored spelling, so every
/// accepted variant is seeded as its own row.
#[derive(Debug, Clone)]
pub struct SqliteCompanyStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCompanyStore {
    /// Create a new SQLite company store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Insert a company record if the spelling is not yet on file
    ///
    /// Used by the seeding routine; reads go through the port.
    #[instrument(skip(self, company), fields(country = %company.country))]
    pub async fn insert(&self, company: &TrainCompany) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let company = company.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT OR IGNORE INTO train_companies (country, url) VALUES (?1, ?2)",
                params![company.country, company.url],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Stored train company");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl CompanyDirectoryPort for SqliteCompanyStore {
    #[instrument(skip(self))]
    async fn operator_url(&self, country: &str) -> Result<Option<String>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let country = country.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let url = conn
                .query_row(
                    "SELECT url FROM train_companies WHERE country = ?1",
                    [&country],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(url)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
