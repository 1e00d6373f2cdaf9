//! SQLite persistence
//!
//! The store is a plain SQLite file with three tables (cities,
//! train_companies, blacklist) behind an r2d2 pool. Writes are durable
//! immediately; blocking rusqlite calls are wrapped in `spawn_blocking`.

mod blacklist_store;
mod city_store;
mod company_store;
mod connection;
mod migrations;

pub use blacklist_store::SqliteBlacklistStore;
pub use city_store::SqliteCityStore;
pub use company_store::SqliteCompanyStore;
pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use migrations::run_migrations;
