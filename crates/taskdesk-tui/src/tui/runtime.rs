/*
[INPUT]:  TaskListView, log buffer, crossterm input events
[OUTPUT]: Ratatui-based TUI run loop, rendering, and shared styles
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: 2026-10-13 Move LogBuffer into the logging module
[UPDATE]: 2026-10-15 Replace dashboard tabs with task list, detail, and log panes
[UPDATE]: 2026-10-19 Drive operations next to the input channel
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taskdesk_client::TaskApi;
use taskdesk_tui::TaskListView;
use taskdesk_tui::logging::LogBufferHandle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::app::{ActiveModal, AppState};
use super::events::{Driven, UiEvent, drive, handle_key_event};
use super::terminal::TerminalGuard;
use super::ui::modal::draw_modal;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const RELOAD_INTERVAL: Duration = Duration::from_secs(5);

pub(super) fn draw_footer<A: TaskApi>(frame: &mut ratatui::Frame, area: Rect, app: &AppState<A>) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Tasks/Comments  "),
        Span::styled("[n]", key_style),
        Span::raw(" New  "),
        Span::styled("[e]", key_style),
        Span::raw(" Edit  "),
        Span::styled("[c]", key_style),
        Span::raw(" Comment  "),
        Span::styled("[d]", key_style),
        Span::raw(" Delete"),
    ]);
    let line2 = Line::from(vec![
        Span::styled("[r]", key_style),
        Span::raw(" Reload  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui<A: TaskApi>(view: TaskListView<A>, log_buffer: LogBufferHandle) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(view, log_buffer);
    app.status_message = "loading tasks...".to_string();
    terminal.draw(|frame| draw_ui(frame, &mut app))?;

    let mut should_quit = false;
    match drive(app.reload(), &mut event_rx).await {
        Driven::Done(Ok(())) => app.status_message = "Ready".to_string(),
        Driven::Done(Err(err)) => app.status_message = format!("load tasks failed: {err}"),
        Driven::Abandoned => app.abandon_operation(),
        Driven::Quit => should_quit = true,
    }

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                if app.refresh_due(RELOAD_INTERVAL) {
                    match drive(app.reload(), &mut event_rx).await {
                        Driven::Done(Ok(())) => {}
                        Driven::Done(Err(err)) => {
                            app.status_message = format!("reload failed: {err}");
                        }
                        Driven::Abandoned => app.abandon_operation(),
                        Driven::Quit => should_quit = true,
                    }
                }
            }
            maybe_event = event_rx.recv() => {
                if let Some(UiEvent::Input(CrosstermEvent::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        match drive(handle_key_event(&mut app, key.code), &mut event_rx).await {
                            Driven::Done(quit) => should_quit = quit,
                            Driven::Abandoned => app.abandon_operation(),
                            Driven::Quit => should_quit = true,
                        }
                    }
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui<A: TaskApi>(frame: &mut ratatui::Frame, app: &mut AppState<A>) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(4),
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[0]);
    draw_task_list(frame, middle[0], app);
    draw_task_detail(frame, middle[1], app);
    draw_logs(frame, layout[1], &app.log_buffer);
    draw_footer(frame, layout[2], app);

    if let Some(active_modal) = app.active_modal.as_ref() {
        let modal = match active_modal {
            ActiveModal::TaskForm(modal) => modal.to_modal(),
            ActiveModal::Comment(modal) => modal.to_modal(),
        };
        let modal_area = centered_rect(area, 60, modal.height());
        draw_modal(frame, modal_area, &modal);
    }
}

/// Horizontally centered by percentage, vertically centered by row count
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
