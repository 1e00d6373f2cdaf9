//! Train-company directory port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the train-company reference table
///
/// Lookup is exact and case-sensitive on the capitalized country name -
/// a record must exist for the spelling being queried.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyDirectoryPort: Send + Sync {
    /// Operator website for a country spelling, when one is on record
    async fn operator_url(&self, country: &str) -> Result<Option<String>, ApplicationError>;
}
