use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Page;

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Back,
    GoTo(Page),
    OpenSettings,
    Submit,
    CycleFocus,
    ToggleFilters,
    AdjustFilters,
    ToggleMode,
    PrevYear,
    NextYear,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key_to_action(key));
            }
        }
    }
    Ok(Action::None)
}

pub fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Back,

        // Pages
        (KeyCode::F(1), _) => Action::GoTo(Page::Welcome),
        (KeyCode::F(2), _) => Action::GoTo(Page::Search),
        (KeyCode::F(3), _) => Action::GoTo(Page::About),
        (KeyCode::F(4), _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::OpenSettings,

        // Search panel
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) => Action::CycleFocus,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ToggleFilters,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::AdjustFilters,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::ToggleMode,
        (KeyCode::Left, _) => Action::PrevYear,
        (KeyCode::Right, _) => Action::NextYear,

        // Results
        (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
