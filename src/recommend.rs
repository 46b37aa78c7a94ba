//! Mixed "recommended for you" rail built from popular movies and shows.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::tmdb::{MediaItem, MediaKind, Movie, TvShow};

/// Items taken from each kind by default.
pub const DEFAULT_PER_KIND: usize = 8;

/// A rail entry, tagged with its media type on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum Recommendation {
    Movie(Movie),
    Tv(TvShow),
}

impl Recommendation {
    pub fn as_media(&self) -> MediaItem<'_> {
        match self {
            Recommendation::Movie(m) => MediaItem::Movie(m),
            Recommendation::Tv(t) => MediaItem::Tv(t),
        }
    }
}

/// Takes up to `per_kind` of each list and shuffles them together.
///
/// The same seed always yields the same order. Repeated (kind, id) pairs
/// are kept once.
pub fn recommend(
    movies: &[Movie],
    shows: &[TvShow],
    per_kind: usize,
    seed: u64,
) -> Vec<Recommendation> {
    let mut seen: HashSet<(MediaKind, u64)> = HashSet::new();

    let mut rail: Vec<Recommendation> = movies
        .iter()
        .take(per_kind)
        .cloned()
        .map(Recommendation::Movie)
        .chain(shows.iter().take(per_kind).cloned().map(Recommendation::Tv))
        .filter(|r| {
            let item = r.as_media();
            seen.insert((item.kind(), item.id()))
        })
        .collect();

    rail.shuffle(&mut StdRng::seed_from_u64(seed));
    rail
}
