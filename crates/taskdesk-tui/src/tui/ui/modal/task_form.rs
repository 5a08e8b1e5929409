/*
[INPUT]:  Task title/description being drafted or edited
[OUTPUT]: Task form modal structure and key handling
[POS]:    TUI UI modal for creating and editing tasks
[UPDATE]: 2026-10-15 Replace create-task modal with a shared create/edit form
*/

use crossterm::event::KeyCode;
use taskdesk_client::TaskId;

use super::{Field, Modal, ModalAction, handle_modal_key};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum FormMode {
    Create,
    Edit(TaskId),
}

pub(in crate::tui) struct TaskFormModal {
    mode: FormMode,
    title: String,
    description: String,
    focus_index: usize,
}

impl TaskFormModal {
    pub(in crate::tui) fn new(mode: FormMode, title: &str, description: &str) -> Self {
        Self {
            mode,
            title: title.to_string(),
            description: description.to_string(),
            focus_index: 0,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let (heading, submit_label) = match self.mode {
            FormMode::Create => (String::from("Create New Task"), "Create Task"),
            FormMode::Edit(id) => (format!("Edit Task #{id}"), "Save"),
        };

        Modal {
            title: heading,
            focus_index: self.focus_index,
            fields: vec![
                Field::TextInput {
                    label: String::from("Title"),
                    value: self.title.clone(),
                },
                Field::TextInput {
                    label: String::from("Description"),
                    value: self.description.clone(),
                },
                Field::Button {
                    label: String::from(submit_label),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: String::from("Cancel"),
                    action: ModalAction::Cancel,
                },
            ],
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    pub(in crate::tui) fn mode(&self) -> FormMode {
        self.mode
    }

    pub(in crate::tui) fn title(&self) -> &str {
        self.title.as_str()
    }

    pub(in crate::tui) fn description(&self) -> &str {
        self.description.as_str()
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.first() {
            self.title = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(1) {
            self.description = value.clone();
        }
    }
}
