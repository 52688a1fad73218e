//! Client for the paper search service.
//!
//! The service exposes three read-only endpoints under a versioned prefix:
//!
//! - `POST /search`: query plus optional filters, returns ordered records
//! - `GET /years`: publication years present in the index
//! - `GET /stats`: aggregate counts
//!
//! [`SearchBackend`] is the seam the rest of the crate depends on.
//! [`HttpApiClient`] talks to a real server, [`MockBackend`] answers from
//! memory for tests and offline demos.
//!
//! Every failure collapses into [`ApiError::RequestFailed`]; the message says
//! whether the server reported a detail or the request never got an answer.

mod client;
pub mod mock;

pub use client::{ClientBuildError, HttpApiClient};
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::models::{SearchRequest, SearchResponse, Stats};

/// Operations offered by the search service.
#[async_trait]
pub trait SearchBackend: Send + Sync + std::fmt::Debug {
    /// Run one search
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError>;

    /// Publication years known to the index
    async fn years(&self) -> Result<Vec<String>, ApiError>;

    /// Aggregate counts
    async fn stats(&self) -> Result<Stats, ApiError>;
}

/// The endpoints, used to word error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Years,
    Stats,
}

impl Endpoint {
    /// Path relative to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Years => "years",
            Endpoint::Stats => "stats",
        }
    }

    fn failed_prefix(&self) -> &'static str {
        match self {
            Endpoint::Search => "Search failed",
            Endpoint::Years => "Failed to fetch years",
            Endpoint::Stats => "Failed to fetch stats",
        }
    }

    fn transport_message(&self) -> &'static str {
        match self {
            Endpoint::Search => "Search request failed",
            Endpoint::Years => "Years request failed",
            Endpoint::Stats => "Stats request failed",
        }
    }
}

/// Error returned by every backend operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request failed; the message is meant for the user
    #[error("{0}")]
    RequestFailed(String),
}

impl ApiError {
    /// The server answered but reported a problem
    pub fn server(endpoint: Endpoint, detail: impl std::fmt::Display) -> Self {
        ApiError::RequestFailed(format!("{}: {}", endpoint.failed_prefix(), detail))
    }

    /// No usable answer came back
    pub fn transport(endpoint: Endpoint) -> Self {
        ApiError::RequestFailed(endpoint.transport_message().to_string())
    }

    /// The user-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::RequestFailed(msg) => msg,
        }
    }
}
