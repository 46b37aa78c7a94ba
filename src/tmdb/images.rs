//! Image URL construction for the provider's CDN.

/// Shown when a record carries no image path.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.jpg";

/// Poster size used by list cards.
pub const POSTER_SIZE: &str = "w500";
/// Backdrop size used by hero banners.
pub const BACKDROP_SIZE: &str = "w1280";

/// Builds a CDN URL for `path` at `size`, or the placeholder when absent.
pub fn image_url(base_url: &str, path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", base_url.trim_end_matches('/'), size, path),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}
