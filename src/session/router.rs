//! Which page is visible.

/// The three pages of the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Welcome,
    Search,
    About,
}

impl Page {
    /// Every page, in navigation bar order
    pub const ALL: [Page; 3] = [Page::Welcome, Page::Search, Page::About];

    /// Navigation bar label
    pub fn label(&self) -> &'static str {
        match self {
            Page::Welcome => "Home",
            Page::Search => "Search",
            Page::About => "About",
        }
    }
}

/// Holds the visible page. No history, the last navigation wins.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    current: Page,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Switch pages; returns whether the visible page changed
    pub fn navigate(&mut self, page: Page) -> bool {
        let changed = self.current != page;
        if changed {
            tracing::debug!("Navigating {:?} -> {:?}", self.current, page);
        }
        self.current = page;
        changed
    }
}
