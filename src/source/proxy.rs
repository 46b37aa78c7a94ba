//! Proxied access: the client goes through the same-origin `/api` routes.

use async_trait::async_trait;
use serde_json::Value;

use super::{Endpoint, HttpFetcher, MediaSource, Query};
use crate::config::Config;
use crate::error::Result;
use crate::tmdb::MediaKind;

/// Calls the proxy server's `/api` endpoints.
#[derive(Debug, Clone)]
pub struct ProxySource {
    http: HttpFetcher,
}

impl ProxySource {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(
            &config.proxy_base_url,
            config.request_timeout(),
        )?))
    }

    /// Proxy route serving `query`.
    pub fn endpoint(query: &Query) -> Endpoint {
        match query {
            Query::Popular {
                kind,
                page,
                country,
            } => Endpoint::new(format!("/api/{}/popular", route_word(*kind)))
                .param("page", page)
                .param_opt("country", country.as_deref()),
            Query::Trending { kind, page } => {
                Endpoint::new(format!("/api/{}/trending", route_word(*kind))).param("page", page)
            }
            Query::ByGenre {
                kind,
                genre,
                page,
                country,
            } => Endpoint::new(format!("/api/{}/by-genre", route_word(*kind)))
                .param("genre", genre)
                .param("page", page)
                .param_opt("country", country.as_deref()),
            Query::Details { kind, id } => {
                Endpoint::new(format!("/api/{}/{}", route_word(*kind), id))
            }
            Query::Season { tv_id, season } => {
                Endpoint::new(format!("/api/tv/{}/season/{}", tv_id, season))
            }
            Query::Genres { kind } => Endpoint::new(format!("/api/genres/{}", route_word(*kind))),
            Query::Countries => Endpoint::new("/api/countries"),
            Query::Search { query, page } => Endpoint::new("/api/search")
                .param("query", query)
                .param("page", page),
        }
    }
}

/// Path segment the proxy uses for a media kind.
fn route_word(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::Tv => "tv",
    }
}

#[async_trait]
impl MediaSource for ProxySource {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        self.http.get_json(&Self::endpoint(query)).await
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}
