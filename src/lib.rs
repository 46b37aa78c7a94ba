//! PDP Movies - Movie and TV metadata access with a TTL response cache
//!
//! Provides a dual-mode data layer (same-origin proxy or direct provider
//! calls), paginated feeds, player embed URLs and the proxy server itself.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod player;
pub mod recommend;
pub mod source;
pub mod tasks;
pub mod tmdb;

pub use api::{create_router, AppState};
pub use cache::{shared_cache, CacheStore, SharedCache};
pub use config::Config;
pub use error::{AppError, Result};
pub use source::{connect, MediaSource, Query, RuntimeMode};
pub use tasks::spawn_cleanup_task;
