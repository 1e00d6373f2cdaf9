//! Reachability check over the stored city set
//!
//! Answers "are at least N stored cities directly reachable from this
//! origin?" - used after seeding to verify the store holds enough
//! well-connected stations to be useful.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CityStorePort, TransitPort};

/// Counts directly reachable cities from an origin
///
/// Queries the transit port directly: a probe is not a user journey, so it
/// neither consults nor writes the blacklist.
pub struct ReachabilityCheck {
    store: Arc<dyn CityStorePort>,
    transit: Arc<dyn TransitPort>,
}

impl std::fmt::Debug for ReachabilityCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReachabilityCheck").finish_non_exhaustive()
    }
}

impl ReachabilityCheck {
    /// Create a new reachability check over the given ports
    pub fn new(store: Arc<dyn CityStorePort>, transit: Arc<dyn TransitPort>) -> Self {
        Self { store, transit }
    }

    /// Count stored cities directly reachable from `from`, stopping as
    /// soon as `min_required` is reached
    ///
    /// The origin itself is skipped (case-insensitively). A failed probe
    /// counts as unreachable and is logged, never raised.
    #[instrument(skip(self))]
    pub async fn count_reachable(
        &self,
        from: &str,
        min_required: usize,
    ) -> Result<usize, ApplicationError> {
        let cities = self.store.list().await?;
        let from_lower = from.to_lowercase();
        let mut reachable = 0;

        for city in cities {
            let target = city.label().to_string();
            if target.to_lowercase() == from_lower {
                continue;
            }

            match self.transit.fetch_connections(from, &target).await {
                Ok(connections) if !connections.is_empty() => {
                    debug!(%target, %from, "Reachable");
                    reachable += 1;
                },
                Ok(_) => {},
                Err(e) => {
                    warn!(error = %e, %target, "Failed to check connection");
                },
            }

            if reachable >= min_required {
                break;
            }
        }

        debug!(reachable, "Reachability scan finished");
        Ok(reachable)
    }

    /// Whether at least `min_required` stored cities are reachable
    pub async fn has_minimum_reachable(
        &self,
        from: &str,
        min_required: usize,
    ) -> Result<bool, ApplicationError> {
        Ok(self.count_reachable(from, min_required).await? >= min_required)
    }
}
