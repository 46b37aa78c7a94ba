//! Runtime environment probe and access-path selection.

use std::sync::Arc;

use tracing::info;
use url::Url;

use super::{CachedSource, DirectSource, MediaSource, ProxySource};
use crate::cache::{SharedCache, TtlTable};
use crate::config::Config;
use crate::error::Result;

/// How the client reaches the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// Server-hosted: go through the same-origin proxy routes
    Proxied,
    /// Packaged or static shell: call the provider directly
    Direct,
}

impl RuntimeMode {
    /// Classifies the origin the client runs under.
    ///
    /// `file:` pages, `localhost` and origins without a host (or that do
    /// not parse at all) are packaged shells with no proxy behind them.
    pub fn probe(origin: &str) -> Self {
        let Ok(url) = Url::parse(origin.trim()) else {
            return RuntimeMode::Direct;
        };

        if url.scheme() == "file" {
            return RuntimeMode::Direct;
        }
        match url.host_str() {
            None | Some("") | Some("localhost") => RuntimeMode::Direct,
            Some(_) => RuntimeMode::Proxied,
        }
    }
}

/// Probes the configured origin once and builds the matching cached source.
pub fn connect(config: &Config, cache: SharedCache) -> Result<Arc<dyn MediaSource>> {
    let mode = RuntimeMode::probe(&config.app_origin);
    connect_with_mode(mode, config, cache)
}

/// Builds the cached source for an explicit mode.
pub fn connect_with_mode(
    mode: RuntimeMode,
    config: &Config,
    cache: SharedCache,
) -> Result<Arc<dyn MediaSource>> {
    let ttls = TtlTable::default();

    let source: Arc<dyn MediaSource> = match mode {
        RuntimeMode::Direct => {
            info!("Using direct metadata API at {}", config.tmdb_base_url);
            Arc::new(CachedSource::new(DirectSource::from_config(config)?, cache, ttls))
        }
        RuntimeMode::Proxied => {
            info!("Using proxy routes at {}", config.proxy_base_url);
            Arc::new(CachedSource::new(ProxySource::from_config(config)?, cache, ttls))
        }
    };
    Ok(source)
}
