//! Call-site helpers: view-scoped cancellation and log-and-swallow fallback.

use std::fmt::Display;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::error::{AppError, Result};

/// Runs `fut` unless `token` is cancelled first.
///
/// A cancelled request resolves to [`AppError::Cancelled`] and its response,
/// if it ever arrives, is dropped.
pub async fn with_cancel<T, F>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = fut => result,
    }
}

/// Logs a failed fetch and falls back to the empty value.
pub fn or_empty<T: Default>(what: impl Display, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(AppError::Cancelled) => T::default(),
        Err(err) => {
            error!("Error fetching {}: {}", what, err);
            T::default()
        }
    }
}
