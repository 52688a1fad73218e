//! TUI application state and event handling.
//!
//! [`App`] owns the router, the search panel, the settings overlay and the
//! client store, and runs the draw/poll loop. The loop itself is synchronous.
//! Backend calls are spawned on the tokio runtime and report back through a
//! channel that the loop drains once per tick, in arrival order.
//!
//! - **Navigation**: `F1`-`F3` switch pages, the last switch wins
//! - **Search**: `Enter` submits the query; results replace the previous set
//!   whenever a response arrives
//! - **Settings**: modal overlay; while open it captures all keys except `Ctrl+C`
//! - **Status messages**: transient feedback with expiry

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::events::{poll_event, Action};
use super::rendering::{render_ui, RenderState};
use crate::api::{ApiError, SearchBackend};
use crate::models::{SearchResponse, Stats};
use crate::session::{
    render_cards, CardLimits, Page, SearchPanel, SettingsOutcome, SettingsOverlay, ViewRouter,
};
use crate::storage::KeyValueStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Cards skipped by PageUp/PageDown
const PAGE_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Info,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Completion of a spawned backend call
#[derive(Debug)]
pub enum BackendEvent {
    Search(Result<SearchResponse, ApiError>),
    Years(Result<Vec<String>, ApiError>),
    Stats(Result<Stats, ApiError>),
}

/// Settings that do not change while the client runs
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub limits: CardLimits,
    pub export_dir: PathBuf,
    pub limit: Option<usize>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            limits: CardLimits::default(),
            export_dir: PathBuf::from("."),
            limit: None,
        }
    }
}

pub struct App {
    router: ViewRouter,
    panel: SearchPanel,
    settings: SettingsOverlay,
    store: Box<dyn KeyValueStore + Send>,
    backend: Arc<dyn SearchBackend>,
    runtime: Handle,
    events_tx: mpsc::UnboundedSender<BackendEvent>,
    events_rx: mpsc::UnboundedReceiver<BackendEvent>,
    options: AppOptions,
    stats: Option<Stats>,
    years_requested: bool,
    scroll: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        store: Box<dyn KeyValueStore + Send>,
        runtime: Handle,
        options: AppOptions,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let settings = SettingsOverlay::load(&*store);
        let mut panel = SearchPanel::new();
        panel.set_limit(options.limit);

        Self {
            router: ViewRouter::new(),
            panel,
            settings,
            store,
            backend,
            runtime,
            events_tx,
            events_rx,
            options,
            stats: None,
            years_requested: false,
            scroll: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Error => STATUS_ERROR_DURATION_MS,
            _ => STATUS_SUCCESS_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.request_stats();

        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.drain_backend_events();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                let cards = render_cards(self.panel.results(), &self.options.limits);
                terminal.draw(|f| {
                    let state = RenderState {
                        page: self.router.current(),
                        panel: &self.panel,
                        settings: &self.settings,
                        cards: &cards,
                        scroll: self.scroll,
                        stats: self.stats.as_ref(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_backend_event(event);
        }
    }

    /// Apply one completed backend call
    fn apply_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Search(result) => {
                let failed = result.is_err();
                self.panel.finish_search(result, &mut *self.store);
                self.scroll = 0;
                if failed {
                    let text = self.panel.last_error().unwrap_or("Search failed").to_string();
                    self.set_status(text, MessageType::Error);
                }
            }
            BackendEvent::Years(Ok(years)) => {
                tracing::debug!("Loaded {} publication years", years.len());
                self.panel.set_years(years);
            }
            BackendEvent::Years(Err(e)) => {
                tracing::error!("Error fetching years: {}", e);
                self.years_requested = false;
            }
            BackendEvent::Stats(Ok(stats)) => self.stats = Some(stats),
            BackendEvent::Stats(Err(e)) => tracing::error!("Error fetching stats: {}", e),
        }
        self.needs_redraw = true;
    }

    fn request_years(&mut self) {
        if self.years_requested {
            return;
        }
        self.years_requested = true;

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.years().await;
            let _ = tx.send(BackendEvent::Years(result));
        });
    }

    fn request_stats(&mut self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.stats().await;
            let _ = tx.send(BackendEvent::Stats(result));
        });
    }

    fn submit_search(&mut self) {
        let Some(request) = self.panel.begin_search() else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.search(&request).await;
            let _ = tx.send(BackendEvent::Search(result));
        });
        self.needs_redraw = true;
    }

    fn navigate(&mut self, page: Page) {
        if self.router.navigate(page) {
            self.needs_redraw = true;
        }
        if page == Page::Search {
            self.request_years();
        }
    }

    /// Handle a user action
    fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if action == Action::None {
            return;
        }
        if self.settings.is_open() {
            self.handle_settings_action(action);
            self.needs_redraw = true;
            return;
        }

        match (self.router.current(), action) {
            (_, Action::GoTo(page)) => self.navigate(page),
            (_, Action::OpenSettings) => {
                self.settings.open();
                self.needs_redraw = true;
            }

            (Page::Search, action) => self.handle_search_action(action),

            // Welcome and About pages
            (Page::Welcome, Action::Submit) => self.navigate(Page::Search),
            (_, Action::Back) | (_, Action::Input('q')) => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_search_action(&mut self, action: Action) {
        match action {
            Action::Back => self.navigate(Page::Welcome),
            Action::Submit => self.submit_search(),
            Action::CycleFocus => self.panel.cycle_focus(),
            Action::ToggleFilters => self.panel.toggle_filters(),
            Action::AdjustFilters if self.panel.show_empty_state() => self.panel.show_filters(),
            Action::ToggleMode => self.panel.toggle_mode(),
            Action::PrevYear if self.panel.filters_visible() => self.panel.cycle_year(false),
            Action::NextYear if self.panel.filters_visible() => self.panel.cycle_year(true),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-(PAGE_STEP as isize)),
            Action::PageDown => self.scroll_by(PAGE_STEP as isize),
            Action::Input(c) => self.panel.push_char(c),
            Action::DeleteChar => self.panel.pop_char(),
            _ => return,
        }
        self.needs_redraw = true;
    }

    fn handle_settings_action(&mut self, action: Action) {
        match action {
            Action::Back | Action::OpenSettings => self.settings.close(),
            Action::ScrollUp => self.settings.select_previous(),
            Action::ScrollDown => self.settings.select_next(),
            Action::Submit => {
                let today = Local::now().date_naive();
                let outcome =
                    self.settings
                        .activate(&mut *self.store, &self.options.export_dir, today);
                let message_type = match &outcome {
                    SettingsOutcome::ComingSoon(_) => MessageType::Info,
                    o if o.is_warning() => MessageType::Error,
                    _ => MessageType::Success,
                };
                self.set_status(outcome.notice(), message_type);
            }
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let total = self.panel.results().len();
        if total == 0 {
            self.scroll = 0;
            return;
        }
        let next = (self.scroll as isize + delta).max(0) as usize;
        self.scroll = next.min(total - 1);
    }

    pub fn current_page(&self) -> Page {
        self.router.current()
    }

    pub fn panel(&self) -> &SearchPanel {
        &self.panel
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::make_record;
    use crate::api::MockBackend;
    use crate::models::SearchMode;
    use crate::storage::{MemoryStore, RESULTS_KEY, THEME_KEY};
    use crate::session::{PanelField, SettingsItem, Theme};

    fn create_app(backend: Arc<MockBackend>) -> App {
        App::new(
            backend,
            Box::new(MemoryStore::new()),
            Handle::current(),
            AppOptions::default(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::Input(c));
        }
    }

    async fn next_event(app: &mut App) {
        let event = app.events_rx.recv().await.unwrap();
        app.apply_backend_event(event);
    }

    #[tokio::test]
    async fn test_starts_on_welcome() {
        let app = create_app(Arc::new(MockBackend::new()));
        assert_eq!(app.current_page(), Page::Welcome);
        assert!(!app.should_quit());
        assert!(app.needs_redraw);
    }

    #[tokio::test]
    async fn test_get_started_opens_search() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::Submit);
        assert_eq!(app.current_page(), Page::Search);
    }

    #[tokio::test]
    async fn test_quit_keys_depend_on_page() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::GoTo(Page::Search));
        app.handle_action(Action::Input('q'));
        assert!(!app.should_quit());
        assert_eq!(app.panel().query(), "q");

        app.handle_action(Action::GoTo(Page::About));
        app.handle_action(Action::Input('q'));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_anywhere() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::OpenSettings);
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_escape_on_search_returns_home() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::GoTo(Page::Search));
        app.handle_action(Action::Back);
        assert_eq!(app.current_page(), Page::Welcome);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let backend = Arc::new(MockBackend::new());
        backend.set_search_response(
            SearchResponse::new(vec![make_record(1, "A"), make_record(2, "B")], SearchMode::Ai)
                .explanation("Found papers on attention mechanisms"),
        );
        let mut app = create_app(Arc::clone(&backend));

        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await; // years
        type_text(&mut app, "transformer attention");
        app.handle_action(Action::Submit);
        assert!(app.panel().is_searching());

        next_event(&mut app).await;
        assert!(!app.panel().is_searching());
        assert_eq!(app.panel().summary(), "Found 2 papers");
        assert_eq!(
            app.panel().explanation(),
            Some("Found papers on attention mechanisms")
        );
        assert!(app.store.get(RESULTS_KEY).is_some());
        assert_eq!(backend.requests()[0].query, "transformer attention");
    }

    #[tokio::test]
    async fn test_blank_submit_sends_nothing() {
        let backend = Arc::new(MockBackend::new());
        let mut app = create_app(Arc::clone(&backend));
        app.handle_action(Action::GoTo(Page::Search));
        type_text(&mut app, "   ");
        app.handle_action(Action::Submit);

        assert!(!app.panel().is_searching());
        assert_eq!(backend.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_sets_error_status() {
        let backend = Arc::new(MockBackend::new());
        backend.set_search_error(ApiError::RequestFailed("Search request failed".into()));
        let mut app = create_app(Arc::clone(&backend));

        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;
        type_text(&mut app, "q2");
        app.handle_action(Action::Submit);
        next_event(&mut app).await;

        assert!(!app.panel().is_searching());
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.text, "Search request failed");
        assert_eq!(status.message_type, MessageType::Error);
    }

    #[tokio::test]
    async fn test_years_loaded_once() {
        let backend = Arc::new(MockBackend::new());
        backend.set_years(vec!["2024".into(), "2023".into()]);
        let mut app = create_app(backend);

        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;
        assert_eq!(app.panel().years(), ["2024", "2023"]);

        app.handle_action(Action::GoTo(Page::Welcome));
        app.handle_action(Action::GoTo(Page::Search));
        assert!(app.events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_years_retried_after_failure() {
        let backend = Arc::new(MockBackend::new());
        backend.set_years_error(ApiError::RequestFailed("Failed to fetch years".into()));
        let mut app = create_app(Arc::clone(&backend));

        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;
        assert!(app.panel().years().is_empty());

        backend.set_years(vec!["2024".into()]);
        app.handle_action(Action::GoTo(Page::Welcome));
        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;
        assert_eq!(app.panel().years(), ["2024"]);
    }

    #[tokio::test]
    async fn test_overlapping_searches_last_resolved_wins() {
        let backend = Arc::new(MockBackend::new().with_delay(Duration::from_millis(20)));
        let mut app = create_app(Arc::clone(&backend));
        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;

        backend.set_search_response(SearchResponse::new(
            vec![make_record(1, "First")],
            SearchMode::Ai,
        ));
        type_text(&mut app, "first");
        app.handle_action(Action::Submit);

        backend.set_search_response(SearchResponse::new(
            vec![make_record(2, "Second"), make_record(3, "Second too")],
            SearchMode::Ai,
        ));
        app.handle_action(Action::Submit);
        assert!(app.panel().is_searching());
        assert_eq!(backend.search_calls(), 2);

        let first = app.events_rx.recv().await.unwrap();
        let last = app.events_rx.recv().await.unwrap();
        let expected = match &last {
            BackendEvent::Search(Ok(response)) => response.articles.clone(),
            other => panic!("unexpected event: {:?}", other),
        };

        app.apply_backend_event(first);
        assert!(!app.panel().is_searching());
        app.apply_backend_event(last);
        assert!(!app.panel().is_searching());
        assert_eq!(app.panel().results(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_adjust_filters_from_empty_state() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;

        // nothing typed yet, so no empty state to act on
        app.handle_action(Action::AdjustFilters);
        assert!(!app.panel().filters_visible());

        type_text(&mut app, "no such paper");
        app.handle_action(Action::Submit);
        next_event(&mut app).await;
        assert!(app.panel().show_empty_state());

        app.handle_action(Action::AdjustFilters);
        assert!(app.panel().filters_visible());
        assert_eq!(app.panel().focus(), PanelField::Year);
    }

    #[tokio::test]
    async fn test_stats_loaded_for_about_page() {
        let backend = Arc::new(MockBackend::new());
        backend.set_stats(Stats {
            total_papers: 4012,
            latest_year: "2024".to_string(),
            year_span: 12,
            ..Stats::default()
        });
        let mut app = create_app(backend);

        app.request_stats();
        next_event(&mut app).await;
        assert_eq!(app.stats.as_ref().map(|s| s.total_papers), Some(4012));
    }

    #[tokio::test]
    async fn test_year_keys_need_visible_filters() {
        let backend = Arc::new(MockBackend::new());
        backend.set_years(vec!["2024".into()]);
        let mut app = create_app(backend);
        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;

        app.handle_action(Action::NextYear);
        assert_eq!(app.panel().filters().year, "");

        app.handle_action(Action::ToggleFilters);
        app.handle_action(Action::NextYear);
        assert_eq!(app.panel().filters().year, "2024");
    }

    #[tokio::test]
    async fn test_mode_toggle() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::GoTo(Page::Search));
        assert_eq!(app.panel().mode(), SearchMode::Ai);
        app.handle_action(Action::ToggleMode);
        assert_eq!(app.panel().mode(), SearchMode::Manual);
    }

    #[tokio::test]
    async fn test_settings_capture_keys() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::OpenSettings);
        assert!(app.settings.is_open());

        app.handle_action(Action::Input('q'));
        assert!(!app.should_quit());
        app.handle_action(Action::GoTo(Page::About));
        assert_eq!(app.current_page(), Page::Welcome);

        app.handle_action(Action::Back);
        assert!(!app.settings.is_open());
    }

    #[tokio::test]
    async fn test_settings_theme_toggle_persists() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::OpenSettings);
        assert_eq!(app.settings.selected(), SettingsItem::Theme);

        app.handle_action(Action::Submit);
        assert_eq!(app.settings.theme(), Theme::Light);
        assert_eq!(app.store.get(THEME_KEY).as_deref(), Some("light"));
        assert!(app.settings.is_open());
    }

    #[tokio::test]
    async fn test_settings_coming_soon_is_info() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.handle_action(Action::OpenSettings);
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.settings.selected(), SettingsItem::Search);
        app.handle_action(Action::Submit);

        assert!(app.settings.is_open());
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.text, "Search Preferences coming soon!");
        assert_eq!(status.message_type, MessageType::Info);
    }

    #[tokio::test]
    async fn test_settings_export_without_results_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            Arc::new(MockBackend::new()),
            Box::new(MemoryStore::new()),
            Handle::current(),
            AppOptions {
                export_dir: dir.path().to_path_buf(),
                ..AppOptions::default()
            },
        );
        app.handle_action(Action::OpenSettings);
        app.handle_action(Action::ScrollUp);
        assert_eq!(app.settings.selected(), SettingsItem::Export);
        app.handle_action(Action::Submit);

        assert!(!app.settings.is_open());
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(
            status.text,
            "No search results to export. Please perform a search first."
        );
        assert_eq!(status.message_type, MessageType::Error);
    }

    #[tokio::test]
    async fn test_scroll_clamped_to_results() {
        let backend = Arc::new(MockBackend::new());
        backend.set_search_response(SearchResponse::new(
            (1..=3).map(|i| make_record(i, "T")).collect(),
            SearchMode::Ai,
        ));
        let mut app = create_app(backend);
        app.handle_action(Action::GoTo(Page::Search));
        next_event(&mut app).await;

        app.handle_action(Action::ScrollUp);
        assert_eq!(app.scroll, 0);

        type_text(&mut app, "x");
        app.handle_action(Action::Submit);
        next_event(&mut app).await;

        app.handle_action(Action::PageDown);
        assert_eq!(app.scroll, 2);
        app.handle_action(Action::ScrollUp);
        assert_eq!(app.scroll, 1);
    }

    #[tokio::test]
    async fn test_status_message_expiry() {
        let mut app = create_app(Arc::new(MockBackend::new()));
        app.set_status("done", MessageType::Success);
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_some());

        if let Some(msg) = app.status_message.as_mut() {
            msg.expires_at = Instant::now() - Duration::from_millis(1);
        }
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());
    }
}
