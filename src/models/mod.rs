//! Request and Response models for the proxy server
//!
//! This module defines the DTOs used for parsing query strings and
//! serializing the server's own response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{parse_path_number, ListParams, RecommendParams, SearchParams};
pub use responses::{CacheStatsResponse, ClearResponse, EmbedResponse, ErrorResponse, HealthResponse};
