//! Negative-cache (blacklist) port
//!
//! Persists directional city pairs confirmed to have zero direct
//! connections so they are never queried again.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the persistent connection blacklist
///
/// Entries are directional: `(A, B)` says nothing about `(B, A)`.
/// Entries never expire.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlacklistPort: Send + Sync {
    /// Exact ordered-pair membership check
    async fn contains(&self, from: &str, to: &str) -> Result<bool, ApplicationError>;

    /// Idempotent insert of an ordered pair
    async fn insert(&self, from: &str, to: &str) -> Result<(), ApplicationError>;
}
