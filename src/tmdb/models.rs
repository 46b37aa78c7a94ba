//! Metadata records as served by the provider
//!
//! Shapes follow the provider's JSON. Optional fields default so partial
//! records still decode; the proxy re-serializes them unchanged in shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// == Media Kind ==
/// Movie or TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(AppError::InvalidRequest(format!(
                "media kind must be 'movie' or 'tv', got '{}'",
                other
            ))),
        }
    }
}

// == Pagination Envelope ==
/// One page of a list, identical for the proxied and the direct path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl<T> Page<T> {
    /// Whether a page after this one exists.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

// == List Records ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub adult: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

// == Detail Records ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
    #[serde(default)]
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetails {
    #[serde(flatten)]
    pub show: TvShow,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub number_of_episodes: u32,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

impl TvDetails {
    /// The season a viewer lands on: the first regular season, else the
    /// first listed one (specials are season 0).
    pub fn default_season(&self) -> Option<&Season> {
        self.seasons
            .iter()
            .find(|s| s.season_number > 0)
            .or_else(|| self.seasons.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub still_path: Option<String>,
    pub episode_number: u32,
    pub season_number: u32,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub season_number: u32,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso_3166_1: String,
    #[serde(default)]
    pub english_name: String,
}

/// Validates and upper-cases an ISO 3166-1 alpha-2 country code.
pub fn normalize_country(code: &str) -> Option<String> {
    let code = code.trim();
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}

// == Search ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// One multi-search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum SearchResult {
    Movie(Movie),
    Tv(TvShow),
    Person(Person),
}

impl SearchResult {
    /// Id of the hit, unique only together with its kind.
    pub fn id(&self) -> u64 {
        match self {
            SearchResult::Movie(m) => m.id,
            SearchResult::Tv(t) => t.id,
            SearchResult::Person(p) => p.id,
        }
    }

    /// The hit as a browsable title; people are not browsable.
    pub fn as_media(&self) -> Option<MediaItem<'_>> {
        match self {
            SearchResult::Movie(m) => Some(MediaItem::Movie(m)),
            SearchResult::Tv(t) => Some(MediaItem::Tv(t)),
            SearchResult::Person(_) => None,
        }
    }
}

// == Media Item View ==
/// Read-only view over a movie or a show for mixed lists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaItem<'a> {
    Movie(&'a Movie),
    Tv(&'a TvShow),
}

impl<'a> MediaItem<'a> {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Movie(_) => MediaKind::Movie,
            MediaItem::Tv(_) => MediaKind::Tv,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            MediaItem::Movie(m) => m.id,
            MediaItem::Tv(t) => t.id,
        }
    }

    /// Title for movies, name for shows.
    pub fn title(&self) -> &'a str {
        match self {
            MediaItem::Movie(m) => &m.title,
            MediaItem::Tv(t) => &t.name,
        }
    }

    /// Year of release or first air date, if the date parses.
    pub fn year(&self) -> Option<i32> {
        use chrono::{Datelike, NaiveDate};

        let date = match self {
            MediaItem::Movie(m) => m.release_date.as_deref(),
            MediaItem::Tv(t) => t.first_air_date.as_deref(),
        }?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Detail page link, `/movie/{id}` or `/tv/{id}`.
    pub fn link(&self) -> String {
        format!("/{}/{}", self.kind(), self.id())
    }

    pub fn backdrop_path(&self) -> Option<&'a str> {
        match self {
            MediaItem::Movie(m) => m.backdrop_path.as_deref(),
            MediaItem::Tv(t) => t.backdrop_path.as_deref(),
        }
    }
}

// == Identity ==
/// Records with a stable id, used to deduplicate accumulated pages.
pub trait Identified {
    type Id: Eq + std::hash::Hash + Clone + fmt::Debug;

    fn identity(&self) -> Self::Id;
}

impl Identified for Movie {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}

impl Identified for TvShow {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}

impl Identified for Episode {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}

impl Identified for SearchResult {
    type Id = (&'static str, u64);

    fn identity(&self) -> Self::Id {
        let kind = match self {
            SearchResult::Movie(_) => "movie",
            SearchResult::Tv(_) => "tv",
            SearchResult::Person(_) => "person",
        };
        (kind, self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_decodes_with_missing_fields() {
        let page: Page<Movie> = serde_json::from_value(json!({
            "results": [{ "id": 603, "title": "The Matrix" }]
        }))
        .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.results[0].title, "The Matrix");
        assert!(page.results[0].poster_path.is_none());
        assert!(!page.has_more());
    }

    #[test]
    fn test_movie_details_flatten() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "runtime": 136,
            "genres": [{ "id": 28, "name": "Action" }]
        }))
        .unwrap();

        assert_eq!(details.movie.id, 603);
        assert_eq!(details.runtime, Some(136));
        let back = serde_json::to_value(&details).unwrap();
        assert_eq!(back["title"], "The Matrix");
        assert_eq!(back["genres"][0]["name"], "Action");
    }

    #[test]
    fn test_default_season_skips_specials() {
        let details: TvDetails = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "seasons": [
                { "id": 1, "season_number": 0, "name": "Specials" },
                { "id": 2, "season_number": 1, "name": "Season 1" }
            ]
        }))
        .unwrap();

        assert_eq!(details.default_season().map(|s| s.season_number), Some(1));
    }

    #[test]
    fn test_search_result_tagging() {
        let page: Page<SearchResult> = serde_json::from_value(json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                { "media_type": "movie", "id": 268, "title": "Batman" },
                { "media_type": "tv", "id": 2098, "name": "Batman" },
                { "media_type": "person", "id": 3894, "name": "Christian Bale" }
            ]
        }))
        .unwrap();

        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].as_media().map(|m| m.link()), Some("/movie/268".to_string()));
        assert_eq!(page.results[1].as_media().map(|m| m.kind()), Some(MediaKind::Tv));
        assert!(page.results[2].as_media().is_none());
        assert_ne!(page.results[0].identity(), page.results[1].identity());
    }

    #[test]
    fn test_media_item_year() {
        let movie = Movie {
            id: 1,
            title: "A".into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: Some("1999-03-30".into()),
            vote_average: 8.2,
            genre_ids: vec![],
            adult: false,
        };
        assert_eq!(MediaItem::Movie(&movie).year(), Some(1999));

        let blank = Movie {
            release_date: Some(String::new()),
            ..movie
        };
        assert_eq!(MediaItem::Movie(&blank).year(), None);
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country("us"), Some("US".to_string()));
        assert_eq!(normalize_country(" KR "), Some("KR".to_string()));
        assert_eq!(normalize_country("USA"), None);
        assert_eq!(normalize_country("1A"), None);
    }

    #[test]
    fn test_media_kind_parse() {
        assert_eq!("movies".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("anime".parse::<MediaKind>().is_err());
    }
}
