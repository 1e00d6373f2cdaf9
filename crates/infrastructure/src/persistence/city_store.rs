//! SQLite-based city store

use std::sync::Arc;

use application::{error::ApplicationError, ports::CityStorePort};
use async_trait::async_trait;
use domain::entities::City;
use domain::value_objects::GeoLocation;
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based city store
///
/// Rows are keyed by the normalized name; `INSERT OR IGNORE` makes the
/// insert an atomic insert-if-absent, so a second resolution of the same
/// city never overwrites the first.
#[derive(Debug, Clone)]
pub struct SqliteCityStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCityStore {
    /// Create a new SQLite city store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn row_to_city(row: &Row<'_>) -> rusqlite::Result<City> {
    let display_name: String = row.get("display_name")?;
    let latitude: f64 = row.get("latitude")?;
    let longitude: f64 = row.get("longitude")?;

    let location = GeoLocation::new(latitude, longitude).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Real, Box::new(e))
    })?;

    Ok(City {
        name: display_name,
        location,
        station_id: row.get("station_id")?,
        station_name: row.get("station_name")?,
    })
}

#[async_trait]
impl CityStorePort for SqliteCityStore {
    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<Option<City>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = normalize(name);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let result = conn
                .query_row(
                    "SELECT display_name, latitude, longitude, station_id, station_name
                     FROM cities WHERE name = ?1",
                    [&key],
                    row_to_city,
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(result)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, city), fields(city = %city.name))]
    async fn insert(&self, city: &City) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let city = city.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO cities
                        (name, display_name, latitude, longitude, station_id, station_name)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        city.normalized_name(),
                        city.name,
                        city.location.latitude(),
                        city.location.longitude(),
                        city.station_id,
                        city.station_name,
                    ],
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            if inserted == 0 {
                debug!("City already stored, insert is a no-op");
            } else {
                debug!("Stored city");
            }
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<City>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut statement = conn
                .prepare(
                    "SELECT display_name, latitude, longitude, station_id, station_name
                     FROM cities ORDER BY rowid ASC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let cities = statement
                .query_map([], row_to_city)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(cities)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
