//! Data Access Module
//!
//! One logical catalog API with interchangeable access paths:
//! - [`DirectSource`] calls the metadata provider itself
//! - [`ProxySource`] goes through the same-origin proxy routes
//! - [`CachedSource`] wraps either with the TTL cache
//!
//! The path is chosen once at startup by [`connect`] and injected as an
//! `Arc<dyn MediaSource>`. Callers only ever see the typed shapes below.

mod cached;
mod cancel;
mod direct;
mod http;
mod mode;
mod proxy;
mod query;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::tmdb::{
    Country, GenreList, MediaKind, Movie, MovieDetails, Page, SearchResult, SeasonDetails,
    TvDetails, TvShow,
};

pub use cached::CachedSource;
pub use cancel::{or_empty, with_cancel};
pub use direct::DirectSource;
pub use http::HttpFetcher;
pub use mode::{connect, connect_with_mode, RuntimeMode};
pub use proxy::ProxySource;
pub use query::{Endpoint, Query};

/// An access path to the metadata catalog.
///
/// Implementors only provide [`fetch`](Self::fetch); the typed operations
/// decode its payload identically for every path.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Raw JSON payload answering `query`.
    async fn fetch(&self, query: &Query) -> Result<Value>;

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "source"
    }

    async fn popular_movies(&self, page: u32, country: Option<&str>) -> Result<Page<Movie>> {
        decode(self.fetch(&Query::popular(MediaKind::Movie, page, country)).await?)
    }

    async fn trending_movies(&self, page: u32) -> Result<Page<Movie>> {
        decode(self.fetch(&Query::trending(MediaKind::Movie, page)).await?)
    }

    async fn movies_by_genre(
        &self,
        genre: u32,
        page: u32,
        country: Option<&str>,
    ) -> Result<Page<Movie>> {
        decode(
            self.fetch(&Query::by_genre(MediaKind::Movie, genre, page, country))
                .await?,
        )
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        decode(self.fetch(&Query::details(MediaKind::Movie, id)).await?)
    }

    async fn popular_tv(&self, page: u32, country: Option<&str>) -> Result<Page<TvShow>> {
        decode(self.fetch(&Query::popular(MediaKind::Tv, page, country)).await?)
    }

    async fn trending_tv(&self, page: u32) -> Result<Page<TvShow>> {
        decode(self.fetch(&Query::trending(MediaKind::Tv, page)).await?)
    }

    async fn tv_by_genre(
        &self,
        genre: u32,
        page: u32,
        country: Option<&str>,
    ) -> Result<Page<TvShow>> {
        decode(
            self.fetch(&Query::by_genre(MediaKind::Tv, genre, page, country))
                .await?,
        )
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        decode(self.fetch(&Query::details(MediaKind::Tv, id)).await?)
    }

    async fn tv_season(&self, tv_id: u64, season: u32) -> Result<SeasonDetails> {
        decode(self.fetch(&Query::season(tv_id, season)).await?)
    }

    async fn movie_genres(&self) -> Result<GenreList> {
        decode(self.fetch(&Query::genres(MediaKind::Movie)).await?)
    }

    async fn tv_genres(&self) -> Result<GenreList> {
        decode(self.fetch(&Query::genres(MediaKind::Tv)).await?)
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        decode(self.fetch(&Query::Countries).await?)
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<SearchResult>> {
        decode(self.fetch(&Query::search(query, page)).await?)
    }
}

/// Decodes a payload into its typed shape; mismatches are malformed responses.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    /// Answers every query with the same canned payload.
    struct Canned(Value);

    #[async_trait]
    impl MediaSource for Canned {
        async fn fetch(&self, _query: &Query) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_typed_operations_decode() {
        let source = Canned(json!({
            "page": 1,
            "total_pages": 3,
            "results": [{ "id": 603, "title": "The Matrix", "name": "The Matrix" }]
        }));

        let movies = source.popular_movies(1, None).await.unwrap();
        assert_eq!(movies.results[0].title, "The Matrix");
        assert!(movies.has_more());

        let shows = source.trending_tv(1).await.unwrap();
        assert_eq!(shows.results[0].name, "The Matrix");
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let source = Canned(json!({ "unexpected": true }));

        let result = source.movie_details(603).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let source: std::sync::Arc<dyn MediaSource> =
            std::sync::Arc::new(Canned(json!([{ "iso_3166_1": "US", "english_name": "United States" }])));

        let countries = source.countries().await.unwrap();
        assert_eq!(countries[0].iso_3166_1, "US");
        assert_eq!(source.name(), "source");
    }
}
