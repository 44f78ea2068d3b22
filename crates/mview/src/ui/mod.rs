mod filter_input;
mod pane_list;

pub use filter_input::FilterInput;
pub use pane_list::PaneList;
