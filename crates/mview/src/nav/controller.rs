//! The navigation controller.
//!
//! [`Navigator`] is the only writer of pane contents. Key-driven events come
//! in through [`Navigator::handle`]; a selection change is queued as a
//! notification for its level and the queue is drained in order, so each
//! cascade step (clear the panes below, fetch, repopulate) finishes before the
//! next one starts and before control returns to the input loop.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::pane::Pane;
use super::scroll::ScrollTracker;
use super::{Focus, Level};
use crate::error::BrowseError;
use crate::filter::{parse_filter, FilterExpression};
use crate::gateway::FetchGateway;

/// Input to the controller, already routed from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Up,
    Down,
    Left,
    Right,
    SubmitFilter(String),
}

/// Read-only view of one pane for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneView<'a> {
    pub items: &'a [String],
    pub selected: Option<usize>,
    pub offset: usize,
    /// Set when the last population of this pane failed.
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    focus: Focus,
    panes: [Pane; 3],
    scrolls: [ScrollTracker; 3],
    errors: [Option<String>; 3],
    filter: FilterExpression,
}

impl NavigationState {
    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn pane(&self, level: Level) -> &Pane {
        &self.panes[level.index()]
    }

    pub fn scroll(&self, level: Level) -> &ScrollTracker {
        &self.scrolls[level.index()]
    }

    pub fn error(&self, level: Level) -> Option<&str> {
        self.errors[level.index()].as_deref()
    }

    pub fn filter(&self) -> &FilterExpression {
        &self.filter
    }

    /// No level holds items unless the level above has a selection.
    pub fn is_consistent(&self) -> bool {
        Level::ALL.iter().all(|&level| match level.next() {
            Some(child) => self.pane(level).selected().is_some() || self.pane(child).is_empty(),
            None => true,
        })
    }
}

pub struct Navigator<G> {
    state: NavigationState,
    gateway: G,
    document_limit: usize,
    pending: VecDeque<Level>,
}

impl<G: FetchGateway> Navigator<G> {
    pub fn new(gateway: G, document_limit: usize) -> Self {
        Self {
            state: NavigationState::default(),
            gateway,
            document_limit,
            pending: VecDeque::new(),
        }
    }

    /// Populate the database pane and select the first database, which
    /// cascades into the collection pane.
    ///
    /// Failing to list databases is returned to the caller; nothing else here
    /// can fail.
    pub fn start(&mut self) -> Result<(), BrowseError> {
        let databases = self.gateway.list_databases()?;
        debug!(count = databases.len(), "databases listed");

        self.reset_pane(Level::Database);
        for name in databases {
            self.state.panes[Level::Database.index()].append(name);
        }

        if !self.state.pane(Level::Database).is_empty() {
            self.select(Level::Database, Some(0));
        }
        Ok(())
    }

    /// Apply one routed input event.
    ///
    /// Only a malformed filter is reported as an error; remote failures end up
    /// in the affected pane's error slot.
    pub fn handle(&mut self, event: NavEvent) -> Result<(), BrowseError> {
        match event {
            NavEvent::Up => self.move_selection(-1),
            NavEvent::Down => self.move_selection(1),
            NavEvent::Left => self.focus_left(),
            NavEvent::Right => self.focus_right(),
            NavEvent::SubmitFilter(text) => return self.submit_filter(&text),
        }
        Ok(())
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.state.focus
    }

    pub fn filter(&self) -> &FilterExpression {
        &self.state.filter
    }

    pub fn document_limit(&self) -> usize {
        self.document_limit
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn view(&self, level: Level) -> PaneView<'_> {
        let pane = self.state.pane(level);
        PaneView {
            items: pane.items(),
            selected: pane.selected(),
            offset: self.state.scroll(level).offset(),
            error: self.state.error(level),
        }
    }

    /// Record the rendered row count of a pane and re-fit its offset.
    pub fn set_viewport_height(&mut self, level: Level, height: usize) {
        if self.state.scrolls[level.index()].height() != height {
            self.state.scrolls[level.index()].set_height(height);
            self.follow(level);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Focus::Pane(level) = self.state.focus else {
            return;
        };

        let changed = self.state.panes[level.index()].move_selection(delta);
        self.follow(level);
        if changed {
            self.notify(level);
        }
    }

    // Focus moves never touch selections.
    fn focus_left(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Pane(level) => Focus::Pane(level.prev().unwrap_or(level)),
            Focus::FilterInput => Focus::Pane(Level::Document),
        };
    }

    fn focus_right(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Pane(level) => match level.next() {
                Some(next) => Focus::Pane(next),
                None => Focus::FilterInput,
            },
            Focus::FilterInput => Focus::FilterInput,
        };
    }

    fn submit_filter(&mut self, text: &str) -> Result<(), BrowseError> {
        let filter = match parse_filter(text) {
            Ok(filter) => filter,
            Err(e) => {
                warn!(error = %e, "rejected filter");
                return Err(e);
            }
        };

        debug!(filter = %filter.label(), "filter applied");
        self.state.filter = filter;

        // Re-run the collection transition so documents are fetched again
        // under the new filter.
        if self.state.pane(Level::Collection).selected().is_some() {
            self.notify(Level::Collection);
        }
        self.select(Level::Document, None);
        Ok(())
    }

    fn select(&mut self, level: Level, index: Option<usize>) {
        if self.state.panes[level.index()].select(index) {
            self.follow(level);
            self.notify(level);
        }
    }

    fn notify(&mut self, level: Level) {
        self.pending.push_back(level);
        while let Some(level) = self.pending.pop_front() {
            match level {
                Level::Database => self.on_database_changed(),
                Level::Collection => self.on_collection_changed(),
                Level::Document => {}
            }
        }
    }

    // The collection pane is rebuilt with nothing selected; its own
    // transition then clears the documents.
    fn on_database_changed(&mut self) {
        self.reset_pane(Level::Collection);
        self.pending.push_back(Level::Collection);

        let Some(database) = self.selected_owned(Level::Database) else {
            debug!("database deselected");
            return;
        };

        match self.gateway.list_collections(&database) {
            Ok(names) => {
                debug!(database = %database, count = names.len(), "collections listed");
                let pane = &mut self.state.panes[Level::Collection.index()];
                for name in names {
                    pane.append(name);
                }
            }
            Err(e) => {
                warn!(database = %database, error = %e, "listing collections failed");
                self.state.errors[Level::Collection.index()] = Some(e.detail().to_string());
            }
        }
        self.follow(Level::Collection);
    }

    fn on_collection_changed(&mut self) {
        self.reset_pane(Level::Document);

        // Nothing selected yet while the pane is being populated.
        let Some(collection) = self.selected_owned(Level::Collection) else {
            return;
        };
        let Some(database) = self.selected_owned(Level::Database) else {
            return;
        };

        let limit = self.document_limit;
        match self
            .gateway
            .find_documents(&database, &collection, &self.state.filter, limit)
        {
            Ok(mut docs) => {
                if docs.len() > limit {
                    warn!(returned = docs.len(), limit, "gateway exceeded the document limit");
                    docs.truncate(limit);
                }
                debug!(database = %database, collection = %collection, count = docs.len(), "documents loaded");
                let pane = &mut self.state.panes[Level::Document.index()];
                for doc in docs {
                    pane.append(doc);
                }
            }
            Err(e) => {
                warn!(database = %database, collection = %collection, error = %e, "find failed");
                self.state.errors[Level::Document.index()] = Some(e.detail().to_string());
            }
        }
        self.follow(Level::Document);
    }

    fn reset_pane(&mut self, level: Level) {
        let i = level.index();
        self.state.panes[i].clear();
        self.state.scrolls[i].reset();
        self.state.errors[i] = None;
    }

    fn follow(&mut self, level: Level) {
        let i = level.index();
        let (selected, len) = (self.state.panes[i].selected(), self.state.panes[i].len());
        self.state.scrolls[i].follow(selected, len);
    }

    fn selected_owned(&self, level: Level) -> Option<String> {
        self.state.pane(level).selected_item().map(str::to_owned)
    }
}
