/*
[INPUT]:  TUI app state and log buffer for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: 2026-10-15 Replace trading panels with task detail panel
*/

mod detail;
mod logs;
mod task_list;

pub mod modal;

pub(in crate::tui) use detail::draw_task_detail;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use task_list::draw_task_list;
