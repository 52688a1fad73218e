//! Record model representing one paper returned by the search service.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A research paper as returned by the backend.
///
/// Records are never mutated on the client; they are rendered and cached
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Numeric identifier assigned by the backend index
    pub id: i64,

    /// Paper title
    pub title: String,

    /// Abstract text
    pub r#abstract: String,

    /// Publication date as sent by the backend (date or timestamp)
    pub published: String,

    /// Category codes (comma-separated, e.g. "cs.AI, stat.ML")
    pub categories: String,

    /// Authors (free text)
    #[serde(default)]
    pub authors: Option<String>,
}

impl Record {
    /// Create a new record with required fields
    pub fn new(id: i64, title: impl Into<String>, published: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            r#abstract: String::new(),
            published: published.into(),
            categories: String::new(),
            authors: None,
        }
    }

    /// Set abstract
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.r#abstract = text.into();
        self
    }

    /// Set categories
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = categories.into();
        self
    }

    /// Set authors
    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    /// Returns the categories as a vector
    pub fn category_list(&self) -> Vec<&str> {
        self.categories
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Authors, if present and non-blank
    pub fn author_text(&self) -> Option<&str> {
        self.authors
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Parse the publication date.
    ///
    /// Accepts plain dates, RFC 3339 timestamps and naive timestamps with
    /// either a `T` or a space separator.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list() {
        let record = Record::new(1, "Test", "2023-01-01").with_categories("cs.AI, stat.ML,, cs.LG ");
        assert_eq!(record.category_list(), vec!["cs.AI", "stat.ML", "cs.LG"]);
    }

    #[test]
    fn test_published_date_formats() {
        let plain = Record::new(1, "a", "2023-06-12");
        assert_eq!(plain.published_date(), NaiveDate::from_ymd_opt(2023, 6, 12));

        let rfc = Record::new(2, "b", "2021-03-04T10:00:00Z");
        assert_eq!(rfc.published_date(), NaiveDate::from_ymd_opt(2021, 3, 4));

        let naive = Record::new(3, "c", "2020-12-31 23:59:59");
        assert_eq!(naive.published_date(), NaiveDate::from_ymd_opt(2020, 12, 31));

        let garbage = Record::new(4, "d", "sometime");
        assert_eq!(garbage.published_date(), None);
    }

    #[test]
    fn test_author_text() {
        let none = Record::new(1, "a", "2020-01-01");
        assert_eq!(none.author_text(), None);

        let blank = Record::new(2, "b", "2020-01-01").with_authors("   ");
        assert_eq!(blank.author_text(), None);

        let some = Record::new(3, "c", "2020-01-01").with_authors("Ada Lovelace");
        assert_eq!(some.author_text(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_deserialize_without_authors() {
        let json = r#"{"id":7,"title":"T","abstract":"A","published":"2022-02-02","categories":"cs.CL"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.authors, None);
        assert_eq!(record.r#abstract, "A");
    }
}
