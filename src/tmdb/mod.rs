//! Metadata Provider Module
//!
//! Record types of the external metadata API and helpers around them.

mod images;
mod models;

pub use images::{image_url, BACKDROP_SIZE, PLACEHOLDER_IMAGE, POSTER_SIZE};
pub use models::{
    normalize_country, Country, Episode, Genre, GenreList, Identified, MediaItem, MediaKind,
    Movie, MovieDetails, Page, Person, ProductionCompany, SearchResult, Season, SeasonDetails,
    SpokenLanguage, TvDetails, TvShow,
};
