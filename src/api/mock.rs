//! In-memory backend for tests and offline use.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::{ApiError, SearchBackend};
use crate::models::{Record, SearchRequest, SearchResponse, Stats};

/// A backend that returns preconfigured responses and counts calls.
#[derive(Debug, Default)]
pub struct MockBackend {
    search_response: Mutex<Option<Result<SearchResponse, ApiError>>>,
    years_response: Mutex<Option<Result<Vec<String>, ApiError>>>,
    stats_response: Mutex<Option<Result<Stats, ApiError>>>,
    requests: Mutex<Vec<SearchRequest>>,
    search_calls: AtomicUsize,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer, to exercise in-flight states.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the search response to return.
    pub fn set_search_response(&self, response: SearchResponse) {
        *lock(&self.search_response) = Some(Ok(response));
    }

    /// Make searches fail with the given error.
    pub fn set_search_error(&self, error: ApiError) {
        *lock(&self.search_response) = Some(Err(error));
    }

    /// Set the years to return.
    pub fn set_years(&self, years: Vec<String>) {
        *lock(&self.years_response) = Some(Ok(years));
    }

    /// Make the years call fail.
    pub fn set_years_error(&self, error: ApiError) {
        *lock(&self.years_response) = Some(Err(error));
    }

    /// Set the stats to return.
    pub fn set_stats(&self, stats: Stats) {
        *lock(&self.stats_response) = Some(Ok(stats));
    }

    /// Clear every configured response.
    pub fn clear_responses(&self) {
        *lock(&self.search_response) = None;
        *lock(&self.years_response) = None;
        *lock(&self.stats_response) = None;
    }

    /// Number of search calls received so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Search requests received so far, oldest first.
    pub fn requests(&self) -> Vec<SearchRequest> {
        lock(&self.requests).clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request.clone());
        // answer with what was configured when the call started
        let configured = lock(&self.search_response).clone();
        self.pause().await;

        configured.unwrap_or_else(|| Ok(SearchResponse::new(Vec::new(), request.search_type)))
    }

    async fn years(&self) -> Result<Vec<String>, ApiError> {
        let configured = lock(&self.years_response).clone();
        self.pause().await;
        configured.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let configured = lock(&self.stats_response).clone();
        self.pause().await;
        configured.unwrap_or_else(|| Ok(Stats::default()))
    }
}

/// Helper function to create a record for testing.
pub fn make_record(id: i64, title: &str) -> Record {
    Record::new(id, title, "2023-06-12")
        .with_abstract(format!("Abstract of {}", title))
        .with_categories("cs.AI, cs.LG")
        .with_authors("A. Author, B. Author")
}
