//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Record;

/// How the backend should interpret the query text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Natural-language search interpreted by the backend's language model
    #[default]
    Ai,
    /// Exact field matching
    Manual,
}

impl SearchMode {
    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            SearchMode::Ai => "ai",
            SearchMode::Manual => "manual",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Ai => "AI",
            SearchMode::Manual => "Manual",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SearchMode::Ai => SearchMode::Manual,
            SearchMode::Manual => SearchMode::Ai,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Optional field filters applied by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub year: String,
    pub category: String,
    pub author: String,
    pub title: String,
    pub r#abstract: String,
}

impl SearchFilters {
    /// Whether every filter is blank
    pub fn is_empty(&self) -> bool {
        [
            &self.year,
            &self.category,
            &self.author,
            &self.title,
            &self.r#abstract,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }

    /// Reset every filter
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_filter: Option<String>,

    /// Search mode
    pub search_type: SearchMode,

    /// Maximum number of results (backend decides when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Create a new request in the given mode
    pub fn new(query: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            query: query.into(),
            year_filter: None,
            category_filter: None,
            author_filter: None,
            title_filter: None,
            abstract_filter: None,
            search_type: mode,
            limit: None,
        }
    }

    /// Apply filters; blank values are dropped
    pub fn filters(mut self, filters: &SearchFilters) -> Self {
        self.year_filter = non_blank(&filters.year);
        self.category_filter = non_blank(&filters.category);
        self.author_filter = non_blank(&filters.author);
        self.title_filter = non_blank(&filters.title);
        self.abstract_filter = non_blank(&filters.r#abstract);
        self
    }

    /// Set year filter
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year_filter = non_blank(&year.into());
        self
    }

    /// Set category filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category_filter = non_blank(&category.into());
        self
    }

    /// Set result limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Blank input means "no filter"; anything else is sent as typed
fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Response of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Records in backend order
    pub articles: Vec<Record>,

    /// Total number of matches reported by the backend
    #[serde(default)]
    pub total_count: usize,

    /// Echoed search mode
    #[serde(default)]
    pub search_type: String,

    /// Natural-language explanation of the results
    #[serde(default)]
    pub explanation: Option<String>,
}

impl SearchResponse {
    /// Create a response for the given records
    pub fn new(articles: Vec<Record>, mode: SearchMode) -> Self {
        Self {
            total_count: articles.len(),
            articles,
            search_type: mode.id().to_string(),
            explanation: None,
        }
    }

    /// Set the explanation
    pub fn explanation(mut self, text: impl Into<String>) -> Self {
        self.explanation = Some(text.into());
        self
    }
}

/// Response of `GET /years`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsResponse {
    #[serde(default)]
    pub years: Vec<String>,
}

/// Response of `GET /stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_papers: u64,
    pub latest_year: String,
    pub year_span: u32,
    #[serde(default)]
    pub papers_by_year: BTreeMap<String, u64>,
}
