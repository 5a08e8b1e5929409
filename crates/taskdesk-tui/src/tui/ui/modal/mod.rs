/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: 2026-10-15 Reuse field-list modal for task and comment forms
[UPDATE]: 2026-10-15 Show a cursor marker on the focused text field
*/

mod comment_form;
mod task_form;

pub(in crate::tui) use comment_form::CommentModal;
pub(in crate::tui) use task_form::{FormMode, TaskFormModal};

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::runtime::border_style;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
}

pub(in crate::tui) enum Field {
    TextInput { label: String, value: String },
    Button { label: String, action: ModalAction },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

impl Modal {
    /// Rows needed to render every field inside the borders
    pub(in crate::tui) fn height(&self) -> u16 {
        u16::try_from(self.fields.len()).unwrap_or(u16::MAX).saturating_add(2)
    }
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = modal
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == modal.focus_index;
            let content = match field {
                Field::TextInput { label, value } if focused => format!("{label}: {value}_"),
                Field::TextInput { label, value } => format!("{label}: {value}"),
                Field::Button { label, .. } => format!("[{label}]"),
            };
            let style = if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(content, style))
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !modal.fields.is_empty() {
                modal.focus_index =
                    (modal.focus_index + modal.fields.len() - 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => match modal.fields.get(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            // Enter on a text field moves on, like Tab
            Some(Field::TextInput { .. }) => {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
                ModalAction::None
            }
            None => ModalAction::None,
        },
        _ => ModalAction::None,
    }
}
