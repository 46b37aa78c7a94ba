//! Shared JSON-over-HTTP fetcher used by both access paths.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::Endpoint;
use crate::error::{AppError, Result};

/// GETs JSON from one base URL, appending fixed parameters to every call.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    fixed_params: Vec<(&'static str, String)>,
}

impl HttpFetcher {
    /// Builds a fetcher with its own client and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Builds a fetcher on an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fixed_params: Vec::new(),
        }
    }

    /// Adds a parameter sent with every request (e.g. the provider key).
    pub fn with_fixed_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fixed_params.push((name, value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `endpoint` and returns the decoded JSON body.
    ///
    /// 404 maps to [`AppError::NotFound`]; any other non-success status to
    /// [`AppError::Upstream`].
    pub async fn get_json(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint.path);
        debug!("GET {} {:?}", url, endpoint.params);

        let response = self
            .client
            .get(&url)
            .query(&self.fixed_params)
            .query(&endpoint.params)
            .send()
            .await
            .map_err(|e| AppError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(endpoint.path.clone()));
        }
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("GET {} failed", endpoint.path),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.without_url().to_string()))?;
        if body.is_empty() {
            return Err(AppError::Decode(format!("empty body from {}", endpoint.path)));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
