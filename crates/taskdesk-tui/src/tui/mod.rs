/*
[INPUT]:  TaskListView over the task service and the log buffer
[OUTPUT]: Ratatui-based TUI for browsing and editing tasks and comments
[POS]:    TUI module for the taskdesk binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: 2026-10-15 Drive the TUI from TaskListView
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_tui;
