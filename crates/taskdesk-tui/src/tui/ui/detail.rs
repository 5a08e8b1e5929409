/*
[INPUT]:  Selected task and its loaded comments
[OUTPUT]: Task detail and comment list rendered into Ratatui frame
[POS]:    TUI UI task detail rendering
[UPDATE]: 2026-10-15 Add detail panel with comments
*/

use chrono::NaiveDateTime;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use taskdesk_client::TaskApi;

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_task_detail<A: TaskApi>(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &mut AppState<A>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let lines = match app.selected_task() {
        Some(task) => {
            let description = if task.description.is_empty() {
                "(no description)"
            } else {
                task.description.as_str()
            };
            vec![
                Line::from(Span::styled(format!(" {} ", task.title), header_style())),
                Line::from(description.to_string()),
                Line::from(format!(
                    "created {}  updated {}",
                    timestamp_label(task.created_at),
                    timestamp_label(task.updated_at)
                )),
            ]
        }
        None => vec![Line::from("No task selected")],
    };
    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Task"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, layout[0]);

    let items: Vec<ListItem> = app
        .selected_comments()
        .iter()
        .map(|comment| ListItem::new(format!("({}) {}", comment.id, comment.content)))
        .collect();
    let items = if items.is_empty() {
        vec![ListItem::new("No comments")]
    } else {
        items
    };

    let title = if app.focus == Focus::Comments {
        "Comments [focus]"
    } else {
        "Comments"
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
    frame.render_stateful_widget(list, layout[1], &mut app.comment_list);
}

fn timestamp_label(value: Option<NaiveDateTime>) -> String {
    value
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
