//! API Module
//!
//! HTTP handlers and routing for the same-origin proxy in front of the
//! metadata provider.
//!
//! # Endpoints
//! - `GET /api/movies/...`, `GET /api/tv/...` - Lists, details and seasons
//! - `GET /api/genres/...`, `GET /api/countries` - Lookup lists
//! - `GET /api/search`, `GET /api/recommended`
//! - `GET /api/cache/stats`, `DELETE /api/cache` - Cache debug overlay
//! - `GET /health` - Health check endpoint

pub mod cache_headers;
pub mod handlers;
pub mod routes;

pub use cache_headers::CachePolicy;
pub use handlers::AppState;
pub use routes::create_router;
