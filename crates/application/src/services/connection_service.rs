//! Direct-connection queries with a persistent negative cache
//!
//! Wraps the transit port with the blacklist discipline: known-dead pairs
//! are never queried again, and a pair is only added to the blacklist when
//! the service confirmed an empty result - a failed query proves nothing
//! and must not poison the cache.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::ports::{BlacklistPort, TrainConnection, TransitPort};

/// Fetches direct connections, honoring and maintaining the blacklist
pub struct ConnectionService {
    transit: Arc<dyn TransitPort>,
    blacklist: Arc<dyn BlacklistPort>,
}

impl std::fmt::Debug for ConnectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionService").finish_non_exhaustive()
    }
}

impl ConnectionService {
    /// Create a new connection service over the given ports
    pub fn new(transit: Arc<dyn TransitPort>, blacklist: Arc<dyn BlacklistPort>) -> Self {
        Self { transit, blacklist }
    }

    /// Fetch upcoming direct connections between two named cities
    ///
    /// Returns an empty list for a blacklisted pair (no network call), a
    /// confirmed-empty response (which blacklists the pair for the future),
    /// or a failed query (which does not).
    #[instrument(skip(self))]
    pub async fn fetch_connections(&self, from: &str, to: &str) -> Vec<TrainConnection> {
        match self.blacklist.contains(from, to).await {
            Ok(true) => {
                info!(%from, %to, "Pair is blacklisted, skipping query");
                return Vec::new();
            },
            Ok(false) => {},
            Err(e) => {
                // Query anyway; a broken cache must not block lookups
                warn!(error = %e, "Blacklist check failed");
            },
        }

        match self.transit.fetch_connections(from, to).await {
            Ok(connections) if connections.is_empty() => {
                info!(%from, %to, "Service confirmed no connections, blacklisting pair");
                if let Err(e) = self.blacklist.insert(from, to).await {
                    warn!(error = %e, "Failed to blacklist pair");
                }
                Vec::new()
            },
            Ok(connections) => {
                info!(count = connections.len(), %from, %to, "Connections found");
                connections
            },
            Err(e) => {
                warn!(error = %e, %from, %to, "Connection query failed");
                Vec::new()
            },
        }
    }
}
