//! HTTP cache headers for proxied responses
//!
//! Each query class carries shared-cache, stale-while-revalidate and CDN
//! lifetimes; the proxy attaches them to successful responses only.

use axum::http::header::{HeaderName, CACHE_CONTROL, VARY};

use crate::cache::QueryClass;

/// `CDN-Cache-Control` is not in the standard header table.
pub const CDN_CACHE_CONTROL: HeaderName = HeaderName::from_static("cdn-cache-control");

/// Cache header values in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Browser max-age; omitted from the header when 0
    pub max_age: u64,
    pub s_max_age: u64,
    pub stale_while_revalidate: u64,
    pub cdn_max_age: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(300, 600, 600)
    }
}

impl CachePolicy {
    const fn new(s_max_age: u64, stale_while_revalidate: u64, cdn_max_age: u64) -> Self {
        Self {
            max_age: 0,
            s_max_age,
            stale_while_revalidate,
            cdn_max_age,
        }
    }

    /// Policy for a query class.
    pub fn for_class(class: QueryClass) -> Self {
        match class {
            QueryClass::Popular | QueryClass::Search => Self::new(300, 600, 600),
            QueryClass::Genre => Self::new(900, 1800, 1800),
            QueryClass::Details => Self::new(1800, 3600, 3600),
            QueryClass::Genres | QueryClass::Season => Self::new(3600, 21600, 21600),
        }
    }

    pub fn cache_control(&self) -> String {
        let mut parts = vec!["public".to_string()];
        if self.max_age > 0 {
            parts.push(format!("max-age={}", self.max_age));
        }
        parts.push(format!("s-maxage={}", self.s_max_age));
        parts.push(format!("stale-while-revalidate={}", self.stale_while_revalidate));
        parts.join(", ")
    }

    pub fn cdn_cache_control(&self) -> String {
        format!("public, s-maxage={}", self.cdn_max_age)
    }

    /// Header set for a response, usable directly as response parts.
    pub fn headers(&self) -> [(HeaderName, String); 3] {
        [
            (CACHE_CONTROL, self.cache_control()),
            (CDN_CACHE_CONTROL, self.cdn_cache_control()),
            (VARY, "Accept-Encoding".to_string()),
        ]
    }
}

/// Headers for responses that must never be cached (debug endpoints).
pub fn no_store() -> [(HeaderName, String); 1] {
    [(CACHE_CONTROL, "no-store".to_string())]
}
