//! Hierarchical navigation: databases → collections → documents.

mod controller;
mod pane;
mod scroll;

pub use controller::{NavEvent, NavigationState, Navigator, PaneView};
pub use pane::Pane;
pub use scroll::ScrollTracker;

/// A level of the browsing hierarchy, ordered top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Database,
    Collection,
    Document,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Database, Level::Collection, Level::Document];

    pub fn index(self) -> usize {
        match self {
            Level::Database => 0,
            Level::Collection => 1,
            Level::Document => 2,
        }
    }

    /// The level below, if any.
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Database => Some(Level::Collection),
            Level::Collection => Some(Level::Document),
            Level::Document => None,
        }
    }

    /// The level above, if any.
    pub fn prev(self) -> Option<Level> {
        match self {
            Level::Database => None,
            Level::Collection => Some(Level::Database),
            Level::Document => Some(Level::Collection),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Level::Database => "Databases",
            Level::Collection => "Collections",
            Level::Document => "Documents",
        }
    }
}

/// Which widget receives directional and text keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Pane(Level),
    FilterInput,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Pane(Level::Database) => "DATABASES",
            Focus::Pane(Level::Collection) => "COLLECTIONS",
            Focus::Pane(Level::Document) => "DOCUMENTS",
            Focus::FilterInput => "FILTER",
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Pane(Level::Database)
    }
}
