//! Projection of records into display cards.

use crate::config::DisplayConfig;
use crate::models::Record;
use crate::utils::truncate_chars;

/// Character budgets applied to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLimits {
    pub abstract_chars: usize,
    pub author_chars: usize,
    pub max_categories: usize,
}

impl Default for CardLimits {
    fn default() -> Self {
        DisplayConfig::default().into()
    }
}

impl From<DisplayConfig> for CardLimits {
    fn from(display: DisplayConfig) -> Self {
        Self {
            abstract_chars: display.abstract_chars,
            author_chars: display.author_chars,
            max_categories: display.max_categories,
        }
    }
}

/// What one result looks like on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub id: i64,
    pub title: String,
    pub abstract_text: String,
    pub authors: Option<String>,
    pub date: String,
    pub categories: Vec<String>,
    /// Number of categories not shown
    pub hidden_categories: usize,
}

impl ResultCard {
    pub fn from_record(record: &Record, limits: &CardLimits) -> Self {
        let all_categories = record.category_list();
        let shown = all_categories.len().min(limits.max_categories);

        Self {
            id: record.id,
            title: record.title.clone(),
            abstract_text: truncate_chars(&record.r#abstract, limits.abstract_chars),
            authors: record
                .author_text()
                .map(|a| truncate_chars(a, limits.author_chars)),
            date: display_date(record),
            categories: all_categories[..shown].iter().map(|c| c.to_string()).collect(),
            hidden_categories: all_categories.len() - shown,
        }
    }

    /// `+N` badge for categories that did not fit
    pub fn overflow_badge(&self) -> Option<String> {
        (self.hidden_categories > 0).then(|| format!("+{}", self.hidden_categories))
    }
}

/// `June 12, 2023`, or the raw text when it is not a date
pub fn display_date(record: &Record) -> String {
    record
        .published_date()
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| record.published.clone())
}

/// Cards for a whole result set, in backend order
pub fn render_cards(records: &[Record], limits: &CardLimits) -> Vec<ResultCard> {
    records
        .iter()
        .map(|r| ResultCard::from_record(r, limits))
        .collect()
}
