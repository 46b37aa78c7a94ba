//! Logical metadata queries
//!
//! A [`Query`] names what the caller wants independently of how it is
//! fetched. Each access path maps it to its own endpoint; the cache layer
//! maps it to a [`CacheKey`].

use crate::cache::CacheKey;
use crate::tmdb::{normalize_country, MediaKind};

/// One logical query against the metadata catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    Popular {
        kind: MediaKind,
        page: u32,
        country: Option<String>,
    },
    Trending {
        kind: MediaKind,
        page: u32,
    },
    ByGenre {
        kind: MediaKind,
        genre: u32,
        page: u32,
        country: Option<String>,
    },
    Details {
        kind: MediaKind,
        id: u64,
    },
    Season {
        tv_id: u64,
        season: u32,
    },
    Genres {
        kind: MediaKind,
    },
    Countries,
    Search {
        query: String,
        page: u32,
    },
}

impl Query {
    /// Popular titles, optionally restricted to an origin country.
    ///
    /// Pages start at 1; a malformed country code is dropped.
    pub fn popular(kind: MediaKind, page: u32, country: Option<&str>) -> Self {
        Query::Popular {
            kind,
            page: page.max(1),
            country: country.and_then(normalize_country),
        }
    }

    pub fn trending(kind: MediaKind, page: u32) -> Self {
        Query::Trending {
            kind,
            page: page.max(1),
        }
    }

    pub fn by_genre(kind: MediaKind, genre: u32, page: u32, country: Option<&str>) -> Self {
        Query::ByGenre {
            kind,
            genre,
            page: page.max(1),
            country: country.and_then(normalize_country),
        }
    }

    pub fn details(kind: MediaKind, id: u64) -> Self {
        Query::Details { kind, id }
    }

    pub fn season(tv_id: u64, season: u32) -> Self {
        Query::Season { tv_id, season }
    }

    pub fn genres(kind: MediaKind) -> Self {
        Query::Genres { kind }
    }

    /// Multi search; the text is trimmed.
    pub fn search(query: &str, page: u32) -> Self {
        Query::Search {
            query: query.trim().to_string(),
            page: page.max(1),
        }
    }

    /// Same page of a paginated query moved to `page`. Non-paginated
    /// queries are returned unchanged.
    pub fn with_page(&self, page: u32) -> Self {
        let page = page.max(1);
        let mut next = self.clone();
        match &mut next {
            Query::Popular { page: p, .. }
            | Query::Trending { page: p, .. }
            | Query::ByGenre { page: p, .. }
            | Query::Search { page: p, .. } => *p = page,
            _ => {}
        }
        next
    }

    /// Deterministic cache key of this query.
    pub fn cache_key(&self) -> CacheKey {
        match self {
            Query::Popular {
                kind,
                page,
                country,
            } => CacheKey::popular(*kind, *page, country.as_deref()),
            Query::Trending { kind, page } => CacheKey::trending(*kind, *page),
            Query::ByGenre {
                kind,
                genre,
                page,
                country,
            } => CacheKey::by_genre(*kind, *genre, *page, country.as_deref()),
            Query::Details { kind, id } => CacheKey::details(*kind, *id),
            Query::Season { tv_id, season } => CacheKey::season(*tv_id, *season),
            Query::Genres { kind } => CacheKey::genres(*kind),
            Query::Countries => CacheKey::countries(),
            Query::Search { query, page } => CacheKey::search(query, *page),
        }
    }
}

/// Path plus query-string parameters of one outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    pub fn param_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }
}
