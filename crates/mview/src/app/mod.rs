#[allow(clippy::module_inception)]
mod app;
mod router;

pub use app::{App, AppLayout, HELP_TEXT};
pub use router::{route, Route};
