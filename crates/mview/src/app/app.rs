use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use super::router::{route, Route};
use crate::config::DisplayConfig;
use crate::gateway::FetchGateway;
use crate::nav::{Focus, Level, NavEvent, Navigator};
use crate::ui::{FilterInput, PaneList};

pub const HELP_TEXT: &str = "Press ESC to exit, use arrow keys to navigate. \
Hit RIGHT more to enter the filter box, then press enter to search.";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub panes: [Rect; 3],
    pub filter: Rect,
    pub status: Rect,
    pub help: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, pane_width: u16, show_help: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(u16::from(show_help)),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(pane_width),
                Constraint::Length(pane_width),
                Constraint::Min(10),
            ])
            .split(rows[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(columns[2]);

        Self {
            panes: [columns[0], columns[1], right[0]],
            filter: right[1],
            status: rows[1],
            help: rows[2],
        }
    }

    /// Rows available for items inside a bordered pane.
    pub fn visible_rows(&self, level: Level) -> usize {
        self.panes[level.index()].height.saturating_sub(2) as usize
    }
}

pub struct App<G> {
    pub nav: Navigator<G>,
    pub filter_input: FilterInput,
    pub pane_width: u16,
    pub show_help: bool,
    pub last_status: Option<String>,
    pub last_error: Option<String>,
}

impl<G: FetchGateway> App<G> {
    pub fn new(nav: Navigator<G>, display: &DisplayConfig) -> Self {
        Self {
            nav,
            filter_input: FilterInput::new(),
            pane_width: display.pane_width,
            show_help: display.show_help,
            last_status: None,
            last_error: None,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    if self.on_key(key) {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle one key press. Returns `true` when the app should exit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let at_start = self.filter_input.cursor_at_start();
        match route(key, self.nav.focus(), at_start) {
            Route::Quit => return true,
            Route::Nav(ev) => self.apply(ev),
            Route::SubmitFilter => {
                let text = self.filter_input.text();
                self.apply(NavEvent::SubmitFilter(text));
            }
            Route::EditFilter(key) => self.filter_input.input(key),
            Route::Ignore => {}
        }
        false
    }

    fn apply(&mut self, ev: NavEvent) {
        let submitting = matches!(ev, NavEvent::SubmitFilter(_));
        match self.nav.handle(ev) {
            Ok(()) if submitting => {
                self.last_error = None;
                self.last_status = Some(if self.nav.filter().is_none() {
                    "Filter cleared".to_string()
                } else {
                    format!("Filter applied: {}", self.nav.filter().label())
                });
            }
            Ok(()) => {}
            Err(e) => {
                self.last_status = Some("Filter not applied (see filter box)".to_string());
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let layout = AppLayout::new(frame.area(), self.pane_width, self.show_help);
        for level in Level::ALL {
            self.nav
                .set_viewport_height(level, layout.visible_rows(level));
        }

        let focus = self.nav.focus();
        for level in Level::ALL {
            let widget = PaneList::new(
                level.title(),
                self.nav.view(level),
                focus == Focus::Pane(level),
            );
            frame.render_widget(widget, layout.panes[level.index()]);
        }

        self.filter_input
            .decorate(focus == Focus::FilterInput, self.last_error.as_deref());
        frame.render_widget(&self.filter_input.textarea, layout.filter);

        frame.render_widget(self.status_line(), layout.status);

        if self.show_help {
            frame.render_widget(
                Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
                layout.help,
            );
        }
    }

    fn status_line(&self) -> Paragraph<'static> {
        let state = self.nav.state();
        let docs = state.pane(Level::Document).len();

        let mut path: Vec<&str> = Vec::new();
        for level in [Level::Database, Level::Collection] {
            if let Some(name) = state.pane(level).selected_item() {
                path.push(name);
            }
        }
        let path = if path.is_empty() {
            "-".to_string()
        } else {
            path.join(".")
        };

        let status = self.last_status.as_deref().unwrap_or("Ready");

        let text = format!(
            "Focus: {}  Path: {}  Docs: {}/{}  Filter: {}   | {}",
            self.nav.focus().label(),
            path,
            docs,
            self.nav.document_limit(),
            self.nav.filter().label(),
            status
        );

        let color = if self.last_error.is_some() {
            Color::Red
        } else {
            Color::Gray
        };
        Paragraph::new(text).style(Style::default().fg(color))
    }
}
