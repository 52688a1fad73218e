//! Core data models for records and search operations.

mod record;
mod search;

pub use record::Record;
pub use search::{SearchFilters, SearchMode, SearchRequest, SearchResponse, Stats, YearsResponse};
