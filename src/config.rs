//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default metadata provider base URL
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Default image CDN base URL
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
/// Default embeddable player base URL
pub const DEFAULT_PLAYER_BASE_URL: &str = "https://player.vidsrc.co/embed";
/// Default origin the app is served from
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Static key for the metadata provider
    pub tmdb_api_key: String,
    /// Metadata provider base URL
    pub tmdb_base_url: String,
    /// Image CDN base URL
    pub tmdb_image_base_url: String,
    /// Embeddable player base URL
    pub player_base_url: String,
    /// Origin the client runs under, probed once to pick the access mode
    pub app_origin: String,
    /// Base URL of the same-origin proxy endpoints
    pub proxy_base_url: String,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Outbound request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `TMDB_API_KEY` - Provider key (default: empty)
    /// - `TMDB_BASE_URL` - Provider base URL
    /// - `TMDB_IMAGE_BASE_URL` - Image CDN base URL
    /// - `PLAYER_BASE_URL` - Player embed base URL
    /// - `APP_ORIGIN` - Client origin (default: http://localhost:3000)
    /// - `PROXY_BASE_URL` - Proxy base URL (default: `APP_ORIGIN`)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 600)
    /// - `REQUEST_TIMEOUT` - Outbound timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let app_origin = env::var("APP_ORIGIN").unwrap_or(defaults.app_origin);

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or(defaults.tmdb_api_key),
            tmdb_base_url: env::var("TMDB_BASE_URL").unwrap_or(defaults.tmdb_base_url),
            tmdb_image_base_url: env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or(defaults.tmdb_image_base_url),
            player_base_url: env::var("PLAYER_BASE_URL").unwrap_or(defaults.player_base_url),
            proxy_base_url: env::var("PROXY_BASE_URL").unwrap_or_else(|_| app_origin.clone()),
            app_origin,
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            request_timeout: parse_var("REQUEST_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Outbound request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Cleanup interval as a Duration.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            tmdb_api_key: String::new(),
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            tmdb_image_base_url: DEFAULT_TMDB_IMAGE_BASE_URL.to_string(),
            player_base_url: DEFAULT_PLAYER_BASE_URL.to_string(),
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
            proxy_base_url: DEFAULT_APP_ORIGIN.to_string(),
            cleanup_interval: 600,
            request_timeout: 10,
        }
    }
}
