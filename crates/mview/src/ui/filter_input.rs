use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::{Input, TextArea};

/// Single-line entry for the documents filter.
///
/// The text survives a failed submission so it can be corrected.
pub struct FilterInput {
    pub textarea: TextArea<'static>,
}

impl FilterInput {
    pub fn new() -> Self {
        Self {
            textarea: new_textarea(),
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    pub fn cursor_at_start(&self) -> bool {
        self.textarea.cursor().1 == 0
    }

    /// Feed an editing key. Line breaks are never inserted.
    pub fn input(&mut self, key: KeyEvent) {
        let is_newline = key.code == KeyCode::Enter
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if is_newline {
            return;
        }
        let input: Input = key.into();
        self.textarea.input(input);
    }

    /// Style the border and title for the current focus/error state.
    pub fn decorate(&mut self, focused: bool, error: Option<&str>) {
        let (title, color) = match error {
            Some(err) => (format!(" Filter: {err} "), Color::Red),
            None if focused => (" Filter (Enter to apply) ".to_string(), Color::Cyan),
            None => (" Filter ".to_string(), Color::DarkGray),
        };
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        );
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new()
    }
}

fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![String::new()]);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text(r#"{"name": "a"}  or  age > 30"#);
    textarea
}
