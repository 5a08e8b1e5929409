/*
[INPUT]:  AppState task list and selection
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: 2026-10-15 List remote tasks with comment counts
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};
use taskdesk_client::TaskApi;

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_task_list<A: TaskApi>(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState<A>,
) {
    let items = if app.view.tasks().is_empty() {
        vec![ListItem::new("No tasks found")]
    } else {
        app.view
            .tasks()
            .iter()
            .map(|task| {
                let count = app.view.comments_for(task.id).len();
                let marker = if app.view.is_editing(task.id) { "*" } else { " " };
                ListItem::new(format!("{marker}#{} {} ({count})", task.id, task.title))
            })
            .collect()
    };

    let title = if app.focus == Focus::Tasks {
        "Tasks [focus]"
    } else {
        "Tasks"
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.task_list);
}
