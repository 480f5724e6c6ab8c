//! Response DTOs for the task board API
//!
//! Defines the structure of outgoing HTTP response bodies. Task records and
//! the board view serialize themselves.

use serde::Serialize;

use crate::cache::CacheStats;

/// Connection state of a backing service as reported by the health endpoint.
pub const CONNECTED: &str = "connected";
pub const DISCONNECTED: &str = "disconnected";

/// Response body for the stats endpoint (GET /api/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of invalidations issued after writes
    pub invalidations: u64,
    /// Number of cache operations that failed and were absorbed
    pub soft_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Combines backend counters with the soft failures the service absorbed.
    pub fn new(stats: CacheStats, soft_failures: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            invalidations: stats.invalidations,
            soft_failures,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "OK" when the store is reachable, "DEGRADED" otherwise
    pub status: String,
    /// Store connection state
    pub store: String,
    /// Cache connection state
    pub cache: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds a health report from the reachability of each backend.
    ///
    /// A lost cache does not degrade the service, a lost store does.
    pub fn from_checks(store_ok: bool, cache_ok: bool) -> Self {
        let state = |ok: bool| if ok { CONNECTED } else { DISCONNECTED }.to_string();
        Self {
            status: if store_ok { "OK" } else { "DEGRADED" }.to_string(),
            store: state(store_ok),
            cache: state(cache_ok),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
