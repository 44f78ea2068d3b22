//! Error taxonomy for the browser.
//!
//! Only argument validation and connection establishment are fatal. Everything
//! that happens below the database listing is reported inline and the session
//! keeps running.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowseError {
    /// Bad command-line invocation.
    #[error("{0}")]
    Usage(String),

    /// The deployment could not be reached, or the connection was lost.
    #[error("connection error: {0}")]
    Connection(String),

    /// A listing or find call failed.
    #[error("remote error: {0}")]
    Remote(String),

    /// Malformed filter text.
    #[error("invalid filter: {0}")]
    Parse(String),
}

impl BrowseError {
    pub fn usage(msg: impl Into<String>) -> Self {
        BrowseError::Usage(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        BrowseError::Remote(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        BrowseError::Parse(msg.into())
    }

    /// Whether the process should exit rather than keep the session alive.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BrowseError::Usage(_) | BrowseError::Connection(_))
    }

    /// Message without the category prefix, for inline display in a pane.
    pub fn detail(&self) -> &str {
        match self {
            BrowseError::Usage(msg)
            | BrowseError::Connection(msg)
            | BrowseError::Remote(msg)
            | BrowseError::Parse(msg) => msg,
        }
    }
}
