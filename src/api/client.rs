//! reqwest implementation of [`SearchBackend`].

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, Endpoint, SearchBackend};
use crate::models::{SearchRequest, SearchResponse, Stats, YearsResponse};
use crate::utils::HttpClient;

/// Errors raised while constructing a client
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client for the search service
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: HttpClient,
    base: Url,
}

impl HttpApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000/api/v1`)
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        Self::with_http(base_url, HttpClient::new()?)
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_http(base_url: &str, http: HttpClient) -> Result<Self, ClientBuildError> {
        // Url::join drops the last path segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|source| ClientBuildError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { http, base })
    }

    /// The normalized base URL
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base.join(endpoint.path()).map_err(|e| {
            tracing::error!("Cannot build URL for {}: {}", endpoint.path(), e);
            ApiError::transport(endpoint)
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} request got no response: {}", endpoint.path(), e);
            ApiError::transport(endpoint)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = detail_from_body(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            tracing::warn!("{} returned {}: {}", endpoint.path(), status, detail);
            return Err(ApiError::server(endpoint, detail));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("{} response body could not be read: {}", endpoint.path(), e);
            ApiError::transport(endpoint)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{} response could not be decoded: {}", endpoint.path(), e);
            ApiError::server(endpoint, format!("invalid response body: {}", e))
        })
    }
}

/// Extract the `detail` field the service attaches to error responses
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl SearchBackend for HttpApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let url = self.endpoint_url(Endpoint::Search)?;
        tracing::debug!(
            "POST {} ({} mode, query {:?})",
            url,
            request.search_type,
            request.query
        );
        let builder = self.http.client().post(url).json(request);
        let response: SearchResponse = self.send(Endpoint::Search, builder).await?;
        tracing::info!(
            "Search returned {} of {} records",
            response.articles.len(),
            response.total_count
        );
        Ok(response)
    }

    async fn years(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint_url(Endpoint::Years)?;
        tracing::debug!("GET {}", url);
        let builder = self.http.client().get(url);
        let response: YearsResponse = self.send(Endpoint::Years, builder).await?;
        Ok(response.years)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let url = self.endpoint_url(Endpoint::Stats)?;
        tracing::debug!("GET {}", url);
        let builder = self.http.client().get(url);
        self.send(Endpoint::Stats, builder).await
    }
}
