//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Documents fetched per collection when nothing else is configured.
pub const DEFAULT_DOCUMENT_LIMIT: usize = 400;

/// Narrowest the database and collection panes may be drawn.
pub const MIN_PANE_WIDTH: u16 = 15;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Browsing behaviour
    pub browse: BrowseConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Log file settings
    pub log: LogConfig,
}

/// Connection-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Bound on establishing the initial connection, in seconds
    pub connect_timeout_secs: u64,
    /// Bound on each listing/find call in seconds (0 = no timeout)
    pub query_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            query_timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Maximum number of documents fetched for the selected collection
    pub document_limit: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            document_limit: DEFAULT_DOCUMENT_LIMIT,
        }
    }
}

/// Display-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width in columns of the database and collection panes
    pub pane_width: u16,
    /// Show the key help bar at the bottom of the screen
    pub show_help: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pane_width: 24,
            show_help: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Log file path (defaults to mview.log in the config directory)
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Replace out-of-range values with usable ones.
    pub fn normalized(mut self) -> Self {
        if self.browse.document_limit == 0 {
            self.browse.document_limit = DEFAULT_DOCUMENT_LIMIT;
        }
        self.display.pane_width = self.display.pane_width.max(MIN_PANE_WIDTH);
        self
    }
}
