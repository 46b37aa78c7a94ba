//! Response DTOs for the proxy server
//!
//! Metadata routes pass the provider JSON through unchanged; these bodies
//! cover the server's own endpoints.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::player::PlayTarget;

/// Response body for the cache debug overlay (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Number of stored entries
    pub size: usize,
    /// Stored keys, sorted
    pub keys: Vec<String>,
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            size: stats.size,
            keys: stats.keys,
            hits: stats.counters.hits,
            misses: stats.counters.misses,
            expirations: stats.counters.expirations,
            hit_rate,
        }
    }
}

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries dropped by the clear
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} cached responses", removed),
            removed,
        }
    }
}

/// Response body for the player embed endpoints
#[derive(Debug, Clone, Serialize)]
pub struct EmbedResponse {
    /// Iframe source URL
    pub url: String,
    pub target: PlayTarget,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
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
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
