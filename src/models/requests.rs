//! Query-string and path parameters for the proxy routes
//!
//! Values are taken as raw strings and validated here so every malformed
//! input answers with the JSON error body instead of a bare rejection.

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Parses a `page` parameter: absent means page 1, zero or non-numeric is an error.
fn parse_page(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(s) => match s.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(AppError::InvalidRequest(format!(
                "page must be a positive integer, got '{}'",
                s
            ))),
        },
    }
}

/// Parses a numeric path segment such as a movie id or season number.
pub fn parse_path_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::InvalidRequest(format!("{} must be numeric, got '{}'", what, raw)))
}

/// Parameters for the list routes (popular, trending, by-genre).
///
/// # Fields
/// - `page`: 1-based page, defaults to 1
/// - `country`: optional ISO 3166-1 code
/// - `genre`: genre id, required by the by-genre routes only
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Result<u32> {
        parse_page(self.page.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// The genre id; missing or non-numeric is an error.
    pub fn genre(&self) -> Result<u32> {
        match self.genre.as_deref().map(str::trim) {
            None | Some("") => Err(AppError::InvalidRequest(
                "genre parameter is required".to_string(),
            )),
            Some(raw) => parse_path_number(raw, "genre"),
        }
    }
}

/// Parameters for `/api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl SearchParams {
    /// The trimmed search text; missing or blank is an error.
    pub fn query(&self) -> Result<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("query parameter is required".to_string()))
    }

    pub fn page(&self) -> Result<u32> {
        parse_page(self.page.as_deref())
    }
}

/// Parameters for `/api/recommended`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendParams {
    /// Shuffle seed; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<String>,
}

impl RecommendParams {
    pub fn seed(&self) -> Result<u64> {
        match self.seed.as_deref().map(str::trim) {
            None | Some("") => Ok(rand::random()),
            Some(raw) => parse_path_number(raw, "seed"),
        }
    }
}
