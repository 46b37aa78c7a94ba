//! Cache keys and per-class TTLs
//!
//! Every logical metadata query maps to one deterministic key string and one
//! query class. The class picks both the in-memory TTL and the HTTP cache
//! headers the proxy attaches.

use std::fmt;
use std::time::Duration;

use crate::tmdb::MediaKind;

// == Query Class ==
/// Freshness class of a metadata query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    /// Popular and trending lists
    Popular,
    /// Titles filtered by genre
    Genre,
    /// Single movie or show details
    Details,
    /// Genre and country lists
    Genres,
    /// Search results
    Search,
    /// Season details with episodes
    Season,
}

// == TTL Table ==
/// In-memory TTL per query class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlTable {
    pub popular: Duration,
    pub genre: Duration,
    pub details: Duration,
    pub genres: Duration,
    pub search: Duration,
    pub season: Duration,
}

impl TtlTable {
    /// TTL for a query class.
    pub fn ttl_for(&self, class: QueryClass) -> Duration {
        match class {
            QueryClass::Popular => self.popular,
            QueryClass::Genre => self.genre,
            QueryClass::Details => self.details,
            QueryClass::Genres => self.genres,
            QueryClass::Search => self.search,
            QueryClass::Season => self.season,
        }
    }
}

impl Default for TtlTable {
    fn default() -> Self {
        const MINUTE: u64 = 60;
        Self {
            popular: Duration::from_secs(10 * MINUTE),
            genre: Duration::from_secs(15 * MINUTE),
            details: Duration::from_secs(30 * MINUTE),
            genres: Duration::from_secs(60 * MINUTE),
            search: Duration::from_secs(5 * MINUTE),
            season: Duration::from_secs(60 * MINUTE),
        }
    }
}

// == Cache Key ==
/// Key identifying one logical query, e.g. `popular-movies-2`, `movie-603`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    key: String,
    class: QueryClass,
}

impl CacheKey {
    fn new(key: String, class: QueryClass) -> Self {
        Self { key, class }
    }

    /// `popular-movies-{page}` or `popular-tv-{CC}-{page}`.
    pub fn popular(kind: MediaKind, page: u32, country: Option<&str>) -> Self {
        let key = match country {
            Some(cc) => format!("popular-{}-{}-{}", list_word(kind), cc, page),
            None => format!("popular-{}-{}", list_word(kind), page),
        };
        Self::new(key, QueryClass::Popular)
    }

    /// `trending-movies-{page}` / `trending-tv-{page}`.
    pub fn trending(kind: MediaKind, page: u32) -> Self {
        Self::new(
            format!("trending-{}-{}", list_word(kind), page),
            QueryClass::Popular,
        )
    }

    /// `movies-genre-{genre}-{page}` or `tv-genre-{genre}-{CC}-{page}`.
    pub fn by_genre(kind: MediaKind, genre: u32, page: u32, country: Option<&str>) -> Self {
        let key = match country {
            Some(cc) => format!("{}-genre-{}-{}-{}", list_word(kind), genre, cc, page),
            None => format!("{}-genre-{}-{}", list_word(kind), genre, page),
        };
        Self::new(key, QueryClass::Genre)
    }

    /// `movie-{id}` / `tv-{id}`.
    pub fn details(kind: MediaKind, id: u64) -> Self {
        Self::new(format!("{}-{}", kind.as_str(), id), QueryClass::Details)
    }

    /// `tv-{id}-season-{season}`.
    pub fn season(tv_id: u64, season: u32) -> Self {
        Self::new(
            format!("tv-{}-season-{}", tv_id, season),
            QueryClass::Season,
        )
    }

    /// `movie-genres` / `tv-genres`.
    pub fn genres(kind: MediaKind) -> Self {
        Self::new(format!("{}-genres", kind.as_str()), QueryClass::Genres)
    }

    /// `countries`.
    pub fn countries() -> Self {
        Self::new("countries".to_string(), QueryClass::Genres)
    }

    /// `search-{query}-{page}`. The page is always the last segment, so
    /// queries containing dashes or digits cannot collide.
    pub fn search(query: &str, page: u32) -> Self {
        Self::new(format!("search-{}-{}", query, page), QueryClass::Search)
    }

    /// The key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The freshness class of the query.
    pub fn class(&self) -> QueryClass {
        self.class
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

fn list_word(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::Tv => "tv",
    }
}
