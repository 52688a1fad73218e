//! Search panel state.
//!
//! The panel owns the query text, the filter fields, the mode flag and the
//! most recent result set. It moves between two phases:
//!
//! ```text
//!   Idle --begin_search (non-empty query)--> Searching
//!   Searching --finish_search (any outcome)--> Idle
//! ```
//!
//! Overlapping submissions are not prevented. Each call settles on its own
//! and the last one to resolve overwrites the displayed results.

use crate::api::{ApiError, SearchBackend};
use crate::models::{Record, SearchFilters, SearchMode, SearchRequest, SearchResponse};
use crate::storage::{cache_results, KeyValueStore};

/// Longest accepted input per field
pub const MAX_INPUT_CHARS: usize = 512;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
}

/// Editable fields, in focus order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelField {
    #[default]
    Query,
    Year,
    Category,
    Author,
}

impl PanelField {
    pub fn label(&self) -> &'static str {
        match self {
            PanelField::Query => "Query",
            PanelField::Year => "Publication Year",
            PanelField::Category => "Category",
            PanelField::Author => "Author",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    query: String,
    filters: SearchFilters,
    mode: SearchMode,
    limit: Option<usize>,
    phase: SearchPhase,
    results: Vec<Record>,
    explanation: Option<String>,
    years: Vec<String>,
    show_filters: bool,
    focus: PanelField,
    last_error: Option<String>,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into().chars().take(MAX_INPUT_CHARS).collect();
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut SearchFilters {
        &mut self.filters
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn set_years(&mut self, years: Vec<String>) {
        self.years = years;
    }

    pub fn filters_visible(&self) -> bool {
        self.show_filters
    }

    /// Show or hide the filter fields; hiding returns focus to the query
    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
        if !self.show_filters {
            self.focus = PanelField::Query;
        }
    }

    /// Reveal the filters with the year picker focused
    pub fn show_filters(&mut self) {
        self.show_filters = true;
        self.focus = PanelField::Year;
    }

    pub fn focus(&self) -> PanelField {
        self.focus
    }

    /// Move focus to the next field; filters are skipped while hidden
    pub fn cycle_focus(&mut self) {
        self.focus = if !self.show_filters {
            PanelField::Query
        } else {
            match self.focus {
                PanelField::Query => PanelField::Year,
                PanelField::Year => PanelField::Category,
                PanelField::Category => PanelField::Author,
                PanelField::Author => PanelField::Query,
            }
        };
    }

    /// Type a character into the focused text field
    pub fn push_char(&mut self, c: char) {
        let field = match self.focus {
            PanelField::Query => &mut self.query,
            PanelField::Category => &mut self.filters.category,
            PanelField::Author => &mut self.filters.author,
            // the year is picked from the list, not typed
            PanelField::Year => return,
        };
        if field.chars().count() < MAX_INPUT_CHARS {
            field.push(c);
        }
    }

    /// Delete the last character of the focused field
    pub fn pop_char(&mut self) {
        match self.focus {
            PanelField::Query => {
                self.query.pop();
            }
            PanelField::Category => {
                self.filters.category.pop();
            }
            PanelField::Author => {
                self.filters.author.pop();
            }
            PanelField::Year => self.filters.year.clear(),
        }
    }

    /// Step through "All Years" followed by the known years
    pub fn cycle_year(&mut self, forward: bool) {
        let options: Vec<&str> = std::iter::once("")
            .chain(self.years.iter().map(String::as_str))
            .collect();
        let current = options
            .iter()
            .position(|y| *y == self.filters.year)
            .unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.filters.year = options[next].to_string();
    }

    /// Whether the submit action is enabled
    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Enter `Searching` and build the request, unless the query is blank.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if !self.can_submit() {
            return None;
        }

        let mut request = SearchRequest::new(self.query.clone(), self.mode).filters(&self.filters);
        request.limit = self.limit;

        self.phase = SearchPhase::Searching;
        tracing::debug!("Search started: {:?} ({} mode)", request.query, request.search_type);
        Some(request)
    }

    /// Settle a search. Always returns the panel to `Idle`.
    pub fn finish_search(
        &mut self,
        result: Result<SearchResponse, ApiError>,
        store: &mut dyn KeyValueStore,
    ) {
        self.phase = SearchPhase::Idle;

        match result {
            Ok(response) => {
                tracing::info!("Search resolved with {} records", response.articles.len());
                self.results = response.articles;
                self.explanation = response.explanation.filter(|e| !e.trim().is_empty());
                self.last_error = None;

                if let Err(e) = cache_results(store, &self.results) {
                    tracing::warn!("Could not cache search results: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                self.last_error = Some(e.message().to_string());
            }
        }
    }

    /// Run one full search cycle; returns whether a request was issued.
    pub async fn search(
        &mut self,
        backend: &dyn SearchBackend,
        store: &mut dyn KeyValueStore,
    ) -> bool {
        let Some(request) = self.begin_search() else {
            return false;
        };
        let result = backend.search(&request).await;
        self.finish_search(result, store);
        true
    }

    /// `Found N papers` for the latest resolved result set
    pub fn summary(&self) -> String {
        format!("Found {} papers", self.results.len())
    }

    /// `Search completed in AI mode`
    pub fn mode_caption(&self) -> String {
        format!("Search completed in {} mode", self.mode.label())
    }

    /// Whether to show the "No Results Found" hint
    pub fn show_empty_state(&self) -> bool {
        !self.is_searching() && self.results.is_empty() && !self.query.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::make_record;
    use crate::api::MockBackend;
    use crate::storage::{MemoryStore, RESULTS_KEY};

    #[test]
    fn test_blank_query_does_not_start() {
        let mut panel = SearchPanel::new();
        assert!(panel.begin_search().is_none());
        panel.set_query("   \t ");
        assert!(!panel.can_submit());
        assert!(panel.begin_search().is_none());
        assert_eq!(panel.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_begin_search_builds_request() {
        let mut panel = SearchPanel::new();
        panel.set_query("graph neural networks");
        panel.toggle_mode();
        panel.filters_mut().category = "cs.LG".to_string();
        panel.set_limit(Some(5));

        let request = panel.begin_search().unwrap();
        assert_eq!(panel.phase(), SearchPhase::Searching);
        assert_eq!(request.query, "graph neural networks");
        assert_eq!(request.search_type, SearchMode::Manual);
        assert_eq!(request.category_filter.as_deref(), Some("cs.LG"));
        assert_eq!(request.year_filter, None);
        assert_eq!(request.limit, Some(5));
    }

    #[test]
    fn test_finish_search_success_caches_results() {
        let mut panel = SearchPanel::new();
        let mut store = MemoryStore::new();
        panel.set_query("q");
        panel.begin_search();

        let response = SearchResponse::new(
            vec![make_record(1, "One"), make_record(2, "Two")],
            SearchMode::Ai,
        )
        .explanation("Two matches");
        panel.finish_search(Ok(response), &mut store);

        assert_eq!(panel.phase(), SearchPhase::Idle);
        assert_eq!(panel.summary(), "Found 2 papers");
        assert_eq!(panel.explanation(), Some("Two matches"));
        let cached: Vec<Record> = serde_json::from_str(&store.get(RESULTS_KEY).unwrap()).unwrap();
        assert_eq!(cached, panel.results());
    }

    #[test]
    fn test_finish_search_failure_keeps_previous_results() {
        let mut panel = SearchPanel::new();
        let mut store = MemoryStore::new();
        panel.set_query("q");

        panel.begin_search();
        panel.finish_search(
            Ok(SearchResponse::new(vec![make_record(1, "Kept")], SearchMode::Ai)),
            &mut store,
        );

        panel.begin_search();
        panel.finish_search(
            Err(ApiError::RequestFailed("Search request failed".into())),
            &mut store,
        );

        assert_eq!(panel.phase(), SearchPhase::Idle);
        assert_eq!(panel.results().len(), 1);
        assert_eq!(panel.last_error(), Some("Search request failed"));
    }

    #[test]
    fn test_missing_explanation_clears_previous() {
        let mut panel = SearchPanel::new();
        let mut store = MemoryStore::new();
        panel.set_query("q");

        panel.begin_search();
        panel.finish_search(
            Ok(SearchResponse::new(vec![], SearchMode::Ai).explanation("first")),
            &mut store,
        );
        panel.begin_search();
        panel.finish_search(Ok(SearchResponse::new(vec![], SearchMode::Ai)), &mut store);

        assert_eq!(panel.explanation(), None);
    }

    #[test]
    fn test_last_resolved_response_wins() {
        let mut panel = SearchPanel::new();
        let mut store = MemoryStore::new();
        panel.set_query("first");
        panel.begin_search();
        panel.set_query("second");
        panel.begin_search();

        // the second request resolves first, the first one last
        panel.finish_search(
            Ok(SearchResponse::new(vec![make_record(2, "Second")], SearchMode::Ai)),
            &mut store,
        );
        panel.finish_search(
            Ok(SearchResponse::new(
                vec![make_record(1, "First"), make_record(3, "Also first")],
                SearchMode::Ai,
            )),
            &mut store,
        );

        assert_eq!(panel.results().len(), 2);
        assert_eq!(panel.summary(), "Found 2 papers");
    }

    #[tokio::test]
    async fn test_search_cycle_with_backend() {
        let backend = MockBackend::new();
        backend.set_search_response(
            SearchResponse::new(vec![make_record(1, "A"), make_record(2, "B")], SearchMode::Ai)
                .explanation("Found papers on attention mechanisms"),
        );
        let mut store = MemoryStore::new();
        let mut panel = SearchPanel::new();
        panel.set_query("transformer attention");

        assert!(panel.search(&backend, &mut store).await);
        assert_eq!(backend.search_calls(), 1);
        assert_eq!(panel.phase(), SearchPhase::Idle);
        assert_eq!(panel.summary(), "Found 2 papers");
        assert_eq!(panel.explanation(), Some("Found papers on attention mechanisms"));
        assert_eq!(panel.mode_caption(), "Search completed in AI mode");
    }

    #[tokio::test]
    async fn test_blank_search_never_calls_backend() {
        let backend = MockBackend::new();
        let mut store = MemoryStore::new();
        let mut panel = SearchPanel::new();
        panel.set_query("  ");

        assert!(!panel.search(&backend, &mut store).await);
        assert_eq!(backend.search_calls(), 0);
        assert_eq!(store.get(RESULTS_KEY), None);
    }

    #[test]
    fn test_focus_cycle_respects_filter_visibility() {
        let mut panel = SearchPanel::new();
        panel.cycle_focus();
        assert_eq!(panel.focus(), PanelField::Query);

        panel.toggle_filters();
        panel.cycle_focus();
        assert_eq!(panel.focus(), PanelField::Year);
        panel.cycle_focus();
        panel.cycle_focus();
        assert_eq!(panel.focus(), PanelField::Author);

        panel.toggle_filters();
        assert_eq!(panel.focus(), PanelField::Query);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut panel = SearchPanel::new();
        panel.push_char('a');
        panel.toggle_filters();
        panel.cycle_focus(); // year
        panel.push_char('9');
        panel.cycle_focus(); // category
        panel.push_char('c');
        panel.push_char('s');
        panel.pop_char();

        assert_eq!(panel.query(), "a");
        assert_eq!(panel.filters().year, "");
        assert_eq!(panel.filters().category, "c");
    }

    #[test]
    fn test_cycle_year_wraps_through_all_years() {
        let mut panel = SearchPanel::new();
        panel.set_years(vec!["2024".into(), "2023".into()]);

        panel.cycle_year(true);
        assert_eq!(panel.filters().year, "2024");
        panel.cycle_year(true);
        assert_eq!(panel.filters().year, "2023");
        panel.cycle_year(true);
        assert_eq!(panel.filters().year, "");
        panel.cycle_year(false);
        assert_eq!(panel.filters().year, "2023");
    }

    #[test]
    fn test_empty_state() {
        let mut panel = SearchPanel::new();
        assert!(!panel.show_empty_state());
        panel.set_query("nothing matches");
        assert!(panel.show_empty_state());
        panel.begin_search();
        assert!(!panel.show_empty_state());
    }

    #[test]
    fn test_show_filters_focuses_year() {
        let mut panel = SearchPanel::new();
        panel.show_filters();
        assert!(panel.filters_visible());
        assert_eq!(panel.focus(), PanelField::Year);

        // already visible: stays open
        panel.show_filters();
        assert!(panel.filters_visible());
    }

    #[test]
    fn test_query_length_capped() {
        let mut panel = SearchPanel::new();
        panel.set_query("x".repeat(MAX_INPUT_CHARS + 10));
        assert_eq!(panel.query().chars().count(), MAX_INPUT_CHARS);
        panel.push_char('y');
        assert_eq!(panel.query().chars().count(), MAX_INPUT_CHARS);
    }
}
