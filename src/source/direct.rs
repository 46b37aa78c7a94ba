//! Direct access: the client talks to the metadata provider itself.

use async_trait::async_trait;
use serde_json::Value;

use super::{Endpoint, HttpFetcher, MediaSource, Query};
use crate::config::Config;
use crate::error::Result;

const SORT_BY_POPULARITY: &str = "popularity.desc";

/// Calls the provider's REST API with the static key.
#[derive(Debug, Clone)]
pub struct DirectSource {
    http: HttpFetcher,
}

impl DirectSource {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }

    /// Provider client from the configured base URL, key and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpFetcher::new(&config.tmdb_base_url, config.request_timeout())?
            .with_fixed_param("api_key", config.tmdb_api_key.clone());
        Ok(Self::new(http))
    }

    /// Provider endpoint serving `query`.
    pub fn endpoint(query: &Query) -> Endpoint {
        match query {
            Query::Popular {
                kind,
                page,
                country,
            } => Endpoint::new(format!("/discover/{}", kind))
                .param("page", page)
                .param("sort_by", SORT_BY_POPULARITY)
                .param_opt("with_origin_country", country.as_deref()),
            Query::Trending { kind, page } => {
                Endpoint::new(format!("/trending/{}/week", kind)).param("page", page)
            }
            Query::ByGenre {
                kind,
                genre,
                page,
                country,
            } => Endpoint::new(format!("/discover/{}", kind))
                .param("with_genres", genre)
                .param("page", page)
                .param("sort_by", SORT_BY_POPULARITY)
                .param_opt("with_origin_country", country.as_deref()),
            Query::Details { kind, id } => Endpoint::new(format!("/{}/{}", kind, id)),
            Query::Season { tv_id, season } => {
                Endpoint::new(format!("/tv/{}/season/{}", tv_id, season))
            }
            Query::Genres { kind } => Endpoint::new(format!("/genre/{}/list", kind)),
            Query::Countries => Endpoint::new("/configuration/countries"),
            Query::Search { query, page } => Endpoint::new("/search/multi")
                .param("query", query)
                .param("page", page),
        }
    }
}

#[async_trait]
impl MediaSource for DirectSource {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        self.http.get_json(&Self::endpoint(query)).await
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::MediaKind;

    #[test]
    fn test_popular_uses_discover_sorted_by_popularity() {
        let ep = DirectSource::endpoint(&Query::popular(MediaKind::Movie, 2, Some("FR")));

        assert_eq!(ep.path, "/discover/movie");
        assert!(ep.params.contains(&("page", "2".to_string())));
        assert!(ep.params.contains(&("sort_by", "popularity.desc".to_string())));
        assert!(ep.params.contains(&("with_origin_country", "FR".to_string())));
    }

    #[test]
    fn test_genre_and_search_endpoints() {
        let ep = DirectSource::endpoint(&Query::by_genre(MediaKind::Tv, 18, 1, None));
        assert_eq!(ep.path, "/discover/tv");
        assert!(ep.params.contains(&("with_genres", "18".to_string())));
        assert!(!ep.params.iter().any(|(name, _)| *name == "with_origin_country"));

        let ep = DirectSource::endpoint(&Query::search("the matrix", 1));
        assert_eq!(ep.path, "/search/multi");
        assert!(ep.params.contains(&("query", "the matrix".to_string())));
    }

    #[test]
    fn test_record_endpoints() {
        let path = |q: Query| DirectSource::endpoint(&q).path;

        assert_eq!(path(Query::trending(MediaKind::Tv, 1)), "/trending/tv/week");
        assert_eq!(path(Query::details(MediaKind::Movie, 603)), "/movie/603");
        assert_eq!(path(Query::season(1399, 3)), "/tv/1399/season/3");
        assert_eq!(path(Query::genres(MediaKind::Movie)), "/genre/movie/list");
        assert_eq!(path(Query::Countries), "/configuration/countries");
    }
}
