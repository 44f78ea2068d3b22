//! Key routing: decides what a key press means for the focused widget.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::{Focus, NavEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Quit,
    Nav(NavEvent),
    /// Submit the filter input's current text.
    SubmitFilter,
    /// Pass the key to the filter input for editing.
    EditFilter(KeyEvent),
    Ignore,
}

pub fn route(key: KeyEvent, focus: Focus, filter_cursor_at_start: bool) -> Route {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => return Route::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Route::Quit,
        _ => {}
    }

    match focus {
        Focus::Pane(_) => match key.code {
            KeyCode::Up => Route::Nav(NavEvent::Up),
            KeyCode::Down => Route::Nav(NavEvent::Down),
            KeyCode::Left => Route::Nav(NavEvent::Left),
            KeyCode::Right => Route::Nav(NavEvent::Right),
            _ => Route::Ignore,
        },
        Focus::FilterInput => match key.code {
            KeyCode::Enter => Route::SubmitFilter,
            KeyCode::Left if filter_cursor_at_start => Route::Nav(NavEvent::Left),
            KeyCode::Up | KeyCode::Down => Route::Ignore,
            _ => Route::EditFilter(key),
        },
    }
}
