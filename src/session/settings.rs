//! Settings overlay: theme preference and export of cached results.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{KeyValueStore, RESULTS_KEY, THEME_KEY};

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Persisted value
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a persisted value; anything unknown is dark
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Read the theme from storage
    pub fn load(store: &dyn KeyValueStore) -> Self {
        store
            .get(THEME_KEY)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    /// Write the theme to storage
    pub fn save(self, store: &mut dyn KeyValueStore) {
        if let Err(e) = store.set(THEME_KEY, self.as_str()) {
            tracing::warn!("Could not persist theme: {}", e);
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export errors, worded for the user
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No search results to export. Please perform a search first.")]
    NoResults,

    #[error("Error exporting data. Please try again.")]
    Malformed(#[source] serde_json::Error),

    #[error("Error exporting data. Please try again.")]
    Io(#[from] std::io::Error),
}

/// File name used for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("arxiv-search-results-{}.json", date.format("%Y-%m-%d"))
}

/// Write the cached result set to `dir` as pretty-printed JSON.
///
/// Records are written exactly as cached, with no reshaping.
pub fn export_results(
    store: &dyn KeyValueStore,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let raw = store.get(RESULTS_KEY).ok_or(ExportError::NoResults)?;

    let cached: serde_json::Value = serde_json::from_str(&raw).map_err(ExportError::Malformed)?;
    let records = match cached.as_array() {
        Some(records) if !records.is_empty() => records,
        // an empty list or anything that is not a list counts as no results
        _ => return Err(ExportError::NoResults),
    };

    let content = serde_json::to_string_pretty(&records).map_err(ExportError::Malformed)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, content)?;

    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

/// Entries of the settings overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Theme,
    Search,
    Display,
    Export,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::Theme,
        SettingsItem::Search,
        SettingsItem::Display,
        SettingsItem::Export,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::Theme => "Theme",
            SettingsItem::Search => "Search Preferences",
            SettingsItem::Display => "Display Settings",
            SettingsItem::Export => "Export Data",
        }
    }

    pub fn description(&self, theme: Theme) -> &'static str {
        match self {
            SettingsItem::Theme => match theme {
                Theme::Dark => "Switch to light mode",
                Theme::Light => "Switch to dark mode",
            },
            SettingsItem::Search => "Default search mode and filters",
            SettingsItem::Display => "Result layout and density",
            SettingsItem::Export => "Download search results as JSON",
        }
    }
}

/// What activating an item did
#[derive(Debug)]
pub enum SettingsOutcome {
    ThemeChanged(Theme),
    ComingSoon(&'static str),
    Exported(PathBuf),
    ExportFailed(ExportError),
}

impl SettingsOutcome {
    /// One-line notice for the status bar
    pub fn notice(&self) -> String {
        match self {
            SettingsOutcome::ThemeChanged(theme) => format!("Theme set to {}", theme),
            SettingsOutcome::ComingSoon(label) => format!("{} coming soon!", label),
            SettingsOutcome::Exported(path) => format!("Exported results to {}", path.display()),
            SettingsOutcome::ExportFailed(e) => e.to_string(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, SettingsOutcome::ExportFailed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverlay {
    open: bool,
    selected: usize,
    theme: Theme,
}

impl SettingsOverlay {
    /// Overlay with the theme read from storage
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            theme: Theme::load(store),
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SettingsItem::ALL.len();
    }

    pub fn select_previous(&mut self) {
        let len = SettingsItem::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Flip the theme and persist it
    pub fn toggle_theme(&mut self, store: &mut dyn KeyValueStore) -> Theme {
        self.theme = self.theme.toggled();
        self.theme.save(store);
        self.theme
    }

    /// Activate the selected item. Export closes the overlay, the others
    /// leave it open.
    pub fn activate(
        &mut self,
        store: &mut dyn KeyValueStore,
        export_dir: &Path,
        today: NaiveDate,
    ) -> SettingsOutcome {
        match self.selected() {
            SettingsItem::Theme => SettingsOutcome::ThemeChanged(self.toggle_theme(store)),
            item @ (SettingsItem::Search | SettingsItem::Display) => {
                SettingsOutcome::ComingSoon(item.label())
            }
            SettingsItem::Export => {
                self.close();
                match export_results(store, export_dir, today) {
                    Ok(path) => SettingsOutcome::Exported(path),
                    Err(e) => {
                        tracing::warn!("Export failed: {:?}", e);
                        SettingsOutcome::ExportFailed(e)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::make_record;
    use crate::storage::{cache_results, MemoryStore};
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Dark);
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&store), Theme::Dark);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn test_toggle_twice_restores_persisted_value() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let mut overlay = SettingsOverlay::load(&store);

        assert_eq!(overlay.toggle_theme(&mut store), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(overlay.toggle_theme(&mut store), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(date()), "arxiv-search-results-2024-03-09.json");
    }

    #[test]
    fn test_export_without_results_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = MemoryStore::new();

        let err = export_results(&store, dir.path(), date()).unwrap_err();
        assert!(matches!(err, ExportError::NoResults));
        assert_eq!(
            err.to_string(),
            "No search results to export. Please perform a search first."
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_empty_array_is_no_results() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        store.set(RESULTS_KEY, "[]").unwrap();

        let err = export_results(&store, dir.path(), date()).unwrap_err();
        assert!(matches!(err, ExportError::NoResults));
    }

    #[test]
    fn test_export_malformed_cache() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        store.set(RESULTS_KEY, "{oops").unwrap();

        let err = export_results(&store, dir.path(), date()).unwrap_err();
        assert!(matches!(err, ExportError::Malformed(_)));
        assert_eq!(err.to_string(), "Error exporting data. Please try again.");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_non_list_cache_is_no_results() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        store.set(RESULTS_KEY, r#"{"a":1}"#).unwrap();

        let err = export_results(&store, dir.path(), date()).unwrap_err();
        assert!(matches!(err, ExportError::NoResults));
        assert_eq!(
            err.to_string(),
            "No search results to export. Please perform a search first."
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_records_unmodified() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        let records = vec![make_record(1, "One"), make_record(2, "Two"), make_record(3, "Three")];
        cache_results(&mut store, &records).unwrap();

        let path = export_results(&store, dir.path(), date()).unwrap();
        assert_eq!(path, dir.path().join("arxiv-search-results-2024-03-09.json"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  {"));
        let exported: Vec<crate::models::Record> = serde_json::from_str(&content).unwrap();
        assert_eq!(exported, records);
    }

    #[test]
    fn test_activate_theme_keeps_overlay_open() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        let mut overlay = SettingsOverlay::load(&store);
        overlay.open();

        let outcome = overlay.activate(&mut store, dir.path(), date());
        assert!(matches!(outcome, SettingsOutcome::ThemeChanged(Theme::Light)));
        assert!(overlay.is_open());
        assert_eq!(outcome.notice(), "Theme set to light");
    }

    #[test]
    fn test_activate_placeholders() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        let mut overlay = SettingsOverlay::load(&store);
        overlay.open();
        overlay.select_next();

        let outcome = overlay.activate(&mut store, dir.path(), date());
        assert_eq!(outcome.notice(), "Search Preferences coming soon!");
        assert!(overlay.is_open());
    }

    #[test]
    fn test_activate_export_closes_overlay() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::new();
        let mut overlay = SettingsOverlay::load(&store);
        overlay.open();
        overlay.select_previous();
        assert_eq!(overlay.selected(), SettingsItem::Export);

        let outcome = overlay.activate(&mut store, dir.path(), date());
        assert!(!overlay.is_open());
        assert!(outcome.is_warning());
    }
}
