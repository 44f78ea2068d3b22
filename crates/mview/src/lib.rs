//! mview: a keyboard-driven terminal browser for MongoDB.
//!
//! Databases, collections and documents are shown in three cascading panes.
//! Selecting a database lists its collections; selecting a collection fetches
//! up to a fixed number of its documents, optionally filtered.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod logging;
pub mod nav;
pub mod ui;
pub mod util;

pub use error::BrowseError;
