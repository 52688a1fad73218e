use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level screen layout
pub struct AppLayout {
    pub nav_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Navigation bar: top row
    /// - Page body: everything in between
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            body_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// Search page layout
pub struct SearchLayout {
    pub input_area: Rect,
    /// Zero height while filters are hidden
    pub filters_area: Rect,
    pub summary_area: Rect,
    pub results_area: Rect,
}

impl SearchLayout {
    pub fn new(area: Rect, show_filters: bool) -> Self {
        let filters_height = if show_filters { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(filters_height),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(area);

        Self {
            input_area: chunks[0],
            filters_area: chunks[1],
            summary_area: chunks[2],
            results_area: chunks[3],
        }
    }

    /// Year, category and author boxes side by side
    pub fn filter_columns(&self) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(35),
                Constraint::Percentage(35),
            ])
            .split(self.filters_area);
        [chunks[0], chunks[1], chunks[2]]
    }
}

/// A box of `width` x `height` centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
