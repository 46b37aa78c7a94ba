//! API Routes
//!
//! Configures the Axum router with the proxy endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats, clear_cache, countries, episode_embed, health_handler, movie_details,
    movie_embed, movie_genres, movies_by_genre, popular_movies, popular_tv, recommended, search,
    trending_movies, trending_tv, tv_by_genre, tv_details, tv_genres, tv_season, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/movies/{popular,trending,by-genre,:id}`
/// - `GET /api/tv/{popular,trending,by-genre,:id,:id/season/:season}`
/// - `GET /api/genres/{movies,tv}`, `GET /api/countries`
/// - `GET /api/search`, `GET /api/recommended`
/// - `GET /api/embed/movie/:id`, `GET /api/embed/tv/:id/:season/:episode` - Player URLs
/// - `GET /api/cache/stats`, `DELETE /api/cache` - Cache debug overlay
/// - `GET /health` - Health check endpoint
///
/// Any other method on these paths answers 405.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/movies/popular", get(popular_movies))
        .route("/api/movies/trending", get(trending_movies))
        .route("/api/movies/by-genre", get(movies_by_genre))
        .route("/api/movies/:id", get(movie_details))
        .route("/api/tv/popular", get(popular_tv))
        .route("/api/tv/trending", get(trending_tv))
        .route("/api/tv/by-genre", get(tv_by_genre))
        .route("/api/tv/:id", get(tv_details))
        .route("/api/tv/:id/season/:season", get(tv_season))
        .route("/api/genres/movies", get(movie_genres))
        .route("/api/genres/tv", get(tv_genres))
        .route("/api/countries", get(countries))
        .route("/api/search", get(search))
        .route("/api/recommended", get(recommended))
        .route("/api/embed/movie/:id", get(movie_embed))
        .route("/api/embed/tv/:id/:season/:episode", get(episode_embed))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache", delete(clear_cache))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared_cache, SharedCache, TtlTable};
    use crate::error::{AppError, Result};
    use crate::source::{CachedSource, MediaSource, Query};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    /// Provider stand-in: answers every query with its cache key and counts calls.
    struct FakeUpstream {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MediaSource for FakeUpstream {
        async fn fetch(&self, query: &Query) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query {
                Query::Details { id: 404, .. } => Err(AppError::NotFound("movie 404".into())),
                Query::Details { id: 500, .. } => Err(AppError::Upstream {
                    status: 500,
                    message: "boom".into(),
                }),
                Query::Popular { .. } => Ok(json!({
                    "page": 1,
                    "total_pages": 3,
                    "total_results": 2,
                    "results": [{ "id": 10, "title": "T", "name": "T" }, { "id": 11, "title": "U", "name": "U" }]
                })),
                _ => Ok(json!({ "key": query.cache_key().to_string() })),
            }
        }
    }

    fn create_test_app() -> (Router, Arc<AtomicUsize>, SharedCache) {
        let calls = Arc::new(AtomicUsize::new(0));
        let upstream = FakeUpstream {
            calls: calls.clone(),
        };
        let cache = shared_cache();
        let source = CachedSource::new(upstream, cache.clone(), TtlTable::default());
        let state = AppState::new(Arc::new(source), cache.clone());
        (create_router(state), calls, cache)
    }

    async fn send(app: Router, method: &str, uri: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _, _) = create_test_app();
        let response = send(app, "GET", "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_popular_passes_through_with_headers() {
        let (app, _, _) = create_test_app();

        let response = send(app, "GET", "/api/movies/popular?page=1&country=kr").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["cache-control"],
            "public, s-maxage=300, stale-while-revalidate=600"
        );
        assert_eq!(response.headers()["vary"], "Accept-Encoding");
        let body = body_json(response).await;
        assert_eq!(body["results"][0]["id"], 10);
    }

    #[tokio::test]
    async fn test_routes_map_to_queries() {
        let cases = [
            ("/api/movies/trending?page=2", "trending-movies-2"),
            ("/api/movies/by-genre?genre=28", "movies-genre-28-1"),
            ("/api/movies/603", "movie-603"),
            ("/api/tv/trending", "trending-tv-1"),
            ("/api/tv/by-genre?genre=18&page=3", "tv-genre-18-3"),
            ("/api/tv/1399", "tv-1399"),
            ("/api/tv/1399/season/2", "tv-1399-season-2"),
            ("/api/genres/movies", "movie-genres"),
            ("/api/genres/tv", "tv-genres"),
            ("/api/countries", "countries"),
        ];

        for (uri, expected_key) in cases {
            let (app, _, _) = create_test_app();
            let response = send(app, "GET", uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let body = body_json(response).await;
            assert_eq!(body["key"], expected_key, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_season_headers() {
        let (app, _, _) = create_test_app();
        let response = send(app, "GET", "/api/tv/1399/season/1").await;
        assert_eq!(response.headers()["cdn-cache-control"], "public, s-maxage=21600");
    }

    #[tokio::test]
    async fn test_bad_input_is_400() {
        for uri in [
            "/api/movies/popular?page=0",
            "/api/tv/popular?page=abc",
            "/api/movies/by-genre",
            "/api/search",
            "/api/search?query=%20",
            "/api/movies/abc",
            "/api/tv/1399/season/x",
        ] {
            let (app, _, _) = create_test_app();
            let response = send(app, "GET", uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = body_json(response).await;
            assert!(body["error"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_upstream_errors() {
        let (app, _, _) = create_test_app();
        let response = send(app, "GET", "/api/movies/404").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("cache-control").is_none());

        let (app, _, _) = create_test_app();
        let response = send(app, "GET", "/api/tv/500").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (app, _, _) = create_test_app();
        let response = send(app, "POST", "/api/movies/popular").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_repeated_requests_hit_cache() {
        let (app, calls, cache) = create_test_app();

        send(app.clone(), "GET", "/api/search?query=matrix").await;
        send(app.clone(), "GET", "/api/search?query=matrix").await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let response = send(app, "GET", "/api/cache/stats").await;
        assert_eq!(response.headers()["cache-control"], "no-store");
        let body = body_json(response).await;
        assert_eq!(body["keys"], json!(["search-matrix-1"]));
        assert_eq!(body["hits"], 1);
        assert_eq!(body["misses"], 1);
        assert_eq!(cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_endpoint() {
        let (app, calls, cache) = create_test_app();
        send(app.clone(), "GET", "/api/genres/movies").await;

        let response = send(app.clone(), "DELETE", "/api/cache").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["removed"], 1);
        assert!(cache.read().await.is_empty());

        send(app, "GET", "/api/genres/movies").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_embed_endpoints() {
        let (app, calls, _) = create_test_app();
        let response = send(app.clone(), "GET", "/api/embed/movie/603").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["url"], "https://player.vidsrc.co/embed/movie/603");
        assert_eq!(body["target"]["type"], "movie");

        let response = send(app, "GET", "/api/embed/tv/1399/0/1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommended_is_seeded() {
        let (app, _, _) = create_test_app();
        let first = body_json(send(app.clone(), "GET", "/api/recommended?seed=9").await).await;
        let second = body_json(send(app, "GET", "/api/recommended?seed=9").await).await;

        assert_eq!(first, second);
        let rail = first.as_array().unwrap();
        assert_eq!(rail.len(), 4);
        assert!(rail.iter().any(|r| r["media_type"] == "tv"));
    }
}
