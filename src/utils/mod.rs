//! Utility modules shared by the CLI and the interactive UI.
//!
//! - [`HttpClient`]: reqwest client with the application's user agent and timeouts
//! - [`truncate_chars`]: character-budget truncation used by result cards
//! - [`truncate_with_ellipsis`]: column-width truncation used by tables
//! - [`format_number`]: thousands separators for counts

mod http;
mod text;

pub use http::HttpClient;
pub use text::{format_number, truncate_chars, truncate_with_ellipsis};
