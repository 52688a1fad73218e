//! Front-end session state, independent of any terminal.
//!
//! The TUI and the CLI both drive these components; nothing here draws.

mod cards;
mod router;
mod search_panel;
mod settings;

pub use cards::{display_date, render_cards, CardLimits, ResultCard};
pub use router::{Page, ViewRouter};
pub use search_panel::{PanelField, SearchPanel, SearchPhase, MAX_INPUT_CHARS};
pub use settings::{
    export_file_name, export_results, ExportError, SettingsItem, SettingsOutcome,
    SettingsOverlay, Theme,
};
