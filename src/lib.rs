pub mod model;
pub mod panel;
pub mod remote;
pub mod tui_shell;
