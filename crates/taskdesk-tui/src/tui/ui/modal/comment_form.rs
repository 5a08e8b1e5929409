/*
[INPUT]:  Shared comment draft and the task it will be posted on
[OUTPUT]: Comment compose modal structure and key handling
[POS]:    TUI UI modal for adding comments
[UPDATE]: 2026-10-15 Enter in the text field submits directly
[UPDATE]: 2026-10-16 Reuse the modal for editing an existing comment
*/

use crossterm::event::KeyCode;
use taskdesk_client::{CommentId, TaskId};

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct CommentModal {
    task_id: TaskId,
    comment_id: Option<CommentId>,
    content: String,
    focus_index: usize,
}

impl CommentModal {
    pub(in crate::tui) fn new(task_id: TaskId, content: &str) -> Self {
        Self {
            task_id,
            comment_id: None,
            content: content.to_string(),
            focus_index: 0,
        }
    }

    pub(in crate::tui) fn editing(task_id: TaskId, comment_id: CommentId, content: &str) -> Self {
        Self {
            comment_id: Some(comment_id),
            ..Self::new(task_id, content)
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let (title, submit_label) = match self.comment_id {
            Some(id) => (format!("Edit Comment #{id}"), "Save"),
            None => (format!("Comment on Task #{}", self.task_id), "Add Comment"),
        };
        Modal {
            title,
            focus_index: self.focus_index,
            fields: vec![
                Field::TextInput {
                    label: String::from("Add a comment..."),
                    value: self.content.clone(),
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
        if key == KeyCode::Enter && self.focus_index == 0 {
            return ModalAction::Submit;
        }
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.first() {
            self.content = value.clone();
        }
        action
    }

    pub(in crate::tui) fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub(in crate::tui) fn comment_id(&self) -> Option<CommentId> {
        self.comment_id
    }

    pub(in crate::tui) fn content(&self) -> &str {
        self.content.as_str()
    }
}
