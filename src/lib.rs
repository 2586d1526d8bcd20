pub mod debounce;
pub mod error;
pub mod forms;
pub mod listing;
pub mod logging;
pub mod model;
pub mod remote;
pub mod selector;
pub mod store;
pub mod tui;

mod tui_shell;
