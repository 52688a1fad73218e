//! # Research Hub
//!
//! A terminal client for a semantic paper search service, with an
//! interactive interface and a scriptable command line over the same library.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Wire types (Record, SearchRequest, SearchResponse, Stats)
//! - [`api`]: The [`SearchBackend`] trait, its HTTP client and an in-memory mock
//! - [`session`]: Page router, search panel, result cards and settings overlay
//! - [`storage`]: Client-local key/value store for the theme and cached results
//! - [`tui`]: Interactive ratatui front end
//! - [`ui`]: Colored command-line output
//! - [`utils`]: HTTP client and text helpers
//! - [`config`]: Configuration management

pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod tui;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::{ApiError, HttpApiClient, SearchBackend};
pub use models::{Record, SearchMode, SearchRequest, SearchResponse, Stats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
