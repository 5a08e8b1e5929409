/*
[INPUT]:  Loaded TaskListView
[OUTPUT]: Plain-text listing of tasks with their comments
[POS]:    Presentation helper for the non-interactive `list` subcommand
[UPDATE]: When changing the listing format
*/

use std::fmt::Write as _;

use taskdesk_client::TaskApi;

use crate::view::TaskListView;

/// One task per line, comments indented beneath it
pub fn render_listing<A: TaskApi>(view: &TaskListView<A>) -> String {
    if view.tasks().is_empty() {
        return "no tasks\n".to_string();
    }

    let mut out = String::new();
    for task in view.tasks() {
        let _ = write!(out, "[{}] {}", task.id, task.title);
        if !task.description.is_empty() {
            let _ = write!(out, " - {}", task.description);
        }
        out.push('\n');
        for comment in view.comments_for(task.id) {
            let _ = writeln!(out, "    ({}) {}", comment.id, comment.content);
        }
    }
    out
}
