//! API Handlers
//!
//! HTTP request handlers for the proxy endpoints. Metadata handlers forward
//! one logical query to the cached upstream and pass the provider JSON
//! through with the cache headers of its query class.

use std::sync::Arc;

use axum::{
    extract::{Path, Query as QueryParams, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::cache_headers::{no_store, CachePolicy};
use crate::cache::{QueryClass, SharedCache, TtlTable};
use crate::config::{Config, DEFAULT_PLAYER_BASE_URL};
use crate::error::{AppError, Result};
use crate::models::{
    parse_path_number, CacheStatsResponse, ClearResponse, EmbedResponse, HealthResponse,
    ListParams, RecommendParams, SearchParams,
};
use crate::player::{embed_url, PlayTarget};
use crate::recommend::{recommend, DEFAULT_PER_KIND};
use crate::source::{CachedSource, DirectSource, MediaSource, Query};
use crate::tmdb::MediaKind;

/// Application state shared across all handlers.
///
/// `cache` is the same store the upstream source reads through, shared with
/// the cleanup task and the debug endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Upstream metadata source
    pub source: Arc<dyn MediaSource>,
    /// Process-wide response cache
    pub cache: SharedCache,
    /// Embeddable player base URL
    pub player_base_url: Arc<str>,
}

impl AppState {
    pub fn new(source: Arc<dyn MediaSource>, cache: SharedCache) -> Self {
        Self {
            source,
            cache,
            player_base_url: Arc::from(DEFAULT_PLAYER_BASE_URL),
        }
    }

    /// Builds the server's upstream: direct provider access behind `cache`.
    pub fn from_config(config: &Config, cache: SharedCache) -> Result<Self> {
        let direct = DirectSource::from_config(config)?;
        let source = CachedSource::new(direct, cache.clone(), TtlTable::default());
        Ok(Self {
            player_base_url: Arc::from(config.player_base_url.as_str()),
            ..Self::new(Arc::new(source), cache)
        })
    }
}

/// Runs `query` upstream and wraps the payload with its class headers.
async fn forward(state: &AppState, query: Query) -> Result<Response> {
    let class = query.cache_key().class();
    let value = state.source.fetch(&query).await.map_err(|err| {
        error!("Error fetching {}: {}", query.cache_key(), err);
        err
    })?;

    Ok((CachePolicy::for_class(class).headers(), Json(value)).into_response())
}

async fn popular(state: AppState, kind: MediaKind, params: ListParams) -> Result<Response> {
    let query = Query::popular(kind, params.page()?, params.country());
    forward(&state, query).await
}

async fn trending(state: AppState, kind: MediaKind, params: ListParams) -> Result<Response> {
    forward(&state, Query::trending(kind, params.page()?)).await
}

async fn by_genre(state: AppState, kind: MediaKind, params: ListParams) -> Result<Response> {
    let query = Query::by_genre(kind, params.genre()?, params.page()?, params.country());
    forward(&state, query).await
}

async fn details(state: AppState, kind: MediaKind, id: &str) -> Result<Response> {
    let id = parse_path_number(id, "id")?;
    forward(&state, Query::details(kind, id)).await
}

// == Movies ==

/// Handler for GET /api/movies/popular
pub async fn popular_movies(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    popular(state, MediaKind::Movie, params).await
}

/// Handler for GET /api/movies/trending
pub async fn trending_movies(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    trending(state, MediaKind::Movie, params).await
}

/// Handler for GET /api/movies/by-genre
pub async fn movies_by_genre(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    by_genre(state, MediaKind::Movie, params).await
}

/// Handler for GET /api/movies/:id
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    details(state, MediaKind::Movie, &id).await
}

// == TV ==

/// Handler for GET /api/tv/popular
pub async fn popular_tv(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    popular(state, MediaKind::Tv, params).await
}

/// Handler for GET /api/tv/trending
pub async fn trending_tv(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    trending(state, MediaKind::Tv, params).await
}

/// Handler for GET /api/tv/by-genre
pub async fn tv_by_genre(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Response> {
    by_genre(state, MediaKind::Tv, params).await
}

/// Handler for GET /api/tv/:id
pub async fn tv_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    details(state, MediaKind::Tv, &id).await
}

/// Handler for GET /api/tv/:id/season/:season
pub async fn tv_season(
    State(state): State<AppState>,
    Path((id, season)): Path<(String, String)>,
) -> Result<Response> {
    let query = Query::season(
        parse_path_number(&id, "id")?,
        parse_path_number(&season, "season")?,
    );
    forward(&state, query).await
}

// == Lookups ==

/// Handler for GET /api/genres/movies
pub async fn movie_genres(State(state): State<AppState>) -> Result<Response> {
    forward(&state, Query::genres(MediaKind::Movie)).await
}

/// Handler for GET /api/genres/tv
pub async fn tv_genres(State(state): State<AppState>) -> Result<Response> {
    forward(&state, Query::genres(MediaKind::Tv)).await
}

/// Handler for GET /api/countries
pub async fn countries(State(state): State<AppState>) -> Result<Response> {
    forward(&state, Query::Countries).await
}

/// Handler for GET /api/search
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Response> {
    let query = Query::search(params.query()?, params.page()?);
    forward(&state, query).await
}

/// Handler for GET /api/recommended
///
/// Mixes page 1 of popular movies and popular shows in a seeded shuffle.
pub async fn recommended(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RecommendParams>,
) -> Result<Response> {
    let seed = params.seed()?;

    let (movies, shows) = tokio::join!(
        state.source.popular_movies(1, None),
        state.source.popular_tv(1, None)
    );
    let movies = movies.map_err(|err| {
        error!("Error fetching popular movies: {}", err);
        err
    })?;
    let shows = shows.map_err(|err| {
        error!("Error fetching popular TV: {}", err);
        err
    })?;

    let rail = recommend(&movies.results, &shows.results, DEFAULT_PER_KIND, seed);
    Ok((CachePolicy::for_class(QueryClass::Popular).headers(), Json(rail)).into_response())
}

// == Player ==

fn embed(state: &AppState, target: PlayTarget) -> Result<Json<EmbedResponse>> {
    embed_url(&state.player_base_url, target)
        .map(|url| Json(EmbedResponse { url, target }))
        .ok_or_else(|| AppError::InvalidRequest("unable to load player".to_string()))
}

/// Handler for GET /api/embed/movie/:id
pub async fn movie_embed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmbedResponse>> {
    let id = parse_path_number(&id, "id")?;
    embed(&state, PlayTarget::Movie { id })
}

/// Handler for GET /api/embed/tv/:id/:season/:episode
pub async fn episode_embed(
    State(state): State<AppState>,
    Path((id, season, episode)): Path<(String, String, String)>,
) -> Result<Json<EmbedResponse>> {
    let target = PlayTarget::Episode {
        tv_id: parse_path_number(&id, "id")?,
        season: parse_path_number(&season, "season")?,
        episode: parse_path_number(&episode, "episode")?,
    };
    embed(&state, target)
}

// == Cache Debug ==

/// Handler for GET /api/cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.cache.read().await.stats();
    (no_store(), Json(CacheStatsResponse::from(stats)))
}

/// Handler for DELETE /api/cache
pub async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    let removed = {
        let mut cache = state.cache.write().await;
        let removed = cache.len();
        cache.clear();
        removed
    };
    info!("Cache cleared: {} entries dropped", removed);
    (no_store(), Json(ClearResponse::new(removed)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
