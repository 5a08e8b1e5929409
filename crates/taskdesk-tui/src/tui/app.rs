/*
[INPUT]:  TaskListView, log buffer, selection and focus changes
[OUTPUT]: AppState helpers for TUI rendering and task/comment actions
[POS]:    TUI app state and selection management
[UPDATE]: 2026-10-15 Hold a TaskListView instead of storage and task manager
[UPDATE]: 2026-10-16 Add comment pane focus and comment editing
[UPDATE]: 2026-10-19 Recover state after an abandoned operation
*/

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::widgets::ListState;
use taskdesk_client::{Comment, Task, TaskApi};
use taskdesk_tui::TaskListView;
use taskdesk_tui::logging::LogBufferHandle;

use crate::tui::ui::modal::{CommentModal, FormMode, TaskFormModal};

pub(super) enum ActiveModal {
    TaskForm(TaskFormModal),
    Comment(CommentModal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Tasks,
    Comments,
}

pub(super) struct AppState<A> {
    pub(super) view: TaskListView<A>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) task_list: ListState,
    pub(super) comment_list: ListState,
    pub(super) focus: Focus,
    pub(super) status_message: String,
    pub(super) last_refresh: Instant,
    pub(super) active_modal: Option<ActiveModal>,
}

impl<A: TaskApi> AppState<A> {
    pub(super) fn new(view: TaskListView<A>, log_buffer: LogBufferHandle) -> Self {
        let mut task_list = ListState::default();
        task_list.select(Some(0));
        Self {
            view,
            log_buffer,
            task_list,
            comment_list: ListState::default(),
            focus: Focus::Tasks,
            status_message: "Ready".to_string(),
            last_refresh: Instant::now(),
            active_modal: None,
        }
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let idx = self.task_list.selected()?;
        self.view.tasks().get(idx)
    }

    pub(super) fn selected_comments(&self) -> &[Comment] {
        match self.selected_task() {
            Some(task) => self.view.comments_for(task.id),
            None => &[],
        }
    }

    pub(super) fn selected_comment(&self) -> Option<&Comment> {
        let idx = self.comment_list.selected()?;
        self.selected_comments().get(idx)
    }

    pub(super) fn refresh_due(&self, every: Duration) -> bool {
        self.active_modal.is_none() && self.last_refresh.elapsed() >= every
    }

    pub(super) async fn reload(&mut self) -> Result<()> {
        self.last_refresh = Instant::now();
        let result = self.view.load_tasks().await;
        self.clamp_selection();
        result?;
        Ok(())
    }

    /// Keep both selections inside the current task and comment lists
    pub(super) fn clamp_selection(&mut self) {
        clamp_list(&mut self.task_list, self.view.tasks().len());
        let comments = self.selected_comments().len();
        clamp_list(&mut self.comment_list, comments);
        if comments == 0 && self.focus == Focus::Comments {
            self.focus = Focus::Tasks;
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let (state, len) = match self.focus {
            Focus::Tasks => (&mut self.task_list, self.view.tasks().len()),
            Focus::Comments => {
                let len = self.selected_comments().len();
                (&mut self.comment_list, len)
            }
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        state.select(Some(next));

        if self.focus == Focus::Tasks {
            self.comment_list.select(None);
            self.clamp_selection();
        }
    }

    pub(super) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Tasks if !self.selected_comments().is_empty() => Focus::Comments,
            Focus::Tasks => {
                self.status_message = "selected task has no comments".to_string();
                Focus::Tasks
            }
            Focus::Comments => Focus::Tasks,
        };
        self.clamp_selection();
    }

    pub(super) fn open_create_task(&mut self) {
        let draft = self.view.draft();
        let modal = TaskFormModal::new(FormMode::Create, &draft.title, &draft.description);
        self.active_modal = Some(ActiveModal::TaskForm(modal));
    }

    /// Edit the selected task, or the selected comment when that pane has focus
    pub(super) fn open_edit(&mut self) -> Result<()> {
        let task = self
            .selected_task()
            .cloned()
            .ok_or_else(|| anyhow!("no task selected"))?;

        if self.focus == Focus::Comments {
            let comment = self
                .selected_comment()
                .ok_or_else(|| anyhow!("no comment selected"))?;
            let modal = CommentModal::editing(task.id, comment.id, &comment.content);
            self.active_modal = Some(ActiveModal::Comment(modal));
            return Ok(());
        }

        if !self.view.begin_edit(task.id) {
            return Err(anyhow!("task {} is no longer loaded", task.id));
        }
        let modal = TaskFormModal::new(FormMode::Edit(task.id), &task.title, &task.description);
        self.active_modal = Some(ActiveModal::TaskForm(modal));
        Ok(())
    }

    pub(super) fn open_comment(&mut self) -> Result<()> {
        let task_id = self
            .selected_task()
            .map(|task| task.id)
            .ok_or_else(|| anyhow!("no task selected"))?;
        let modal = CommentModal::new(task_id, self.view.comment_draft());
        self.active_modal = Some(ActiveModal::Comment(modal));
        Ok(())
    }

    /// Called after an in-flight operation was dropped.
    ///
    /// A dropped modal submit has already taken its modal; an edit without a
    /// modal cannot be finished, so it is cancelled.
    pub(super) fn abandon_operation(&mut self) {
        if self.active_modal.is_none() {
            self.view.cancel_edit();
        }
        self.clamp_selection();
        self.status_message = "request abandoned".to_string();
    }

    pub(super) async fn delete_selected(&mut self) -> Result<()> {
        let task_id = self
            .selected_task()
            .map(|task| task.id)
            .ok_or_else(|| anyhow!("no task selected"))?;

        match self.focus {
            Focus::Tasks => {
                self.view.delete_task(task_id).await?;
                self.status_message = format!("task deleted: {task_id}");
            }
            Focus::Comments => {
                let comment_id = self
                    .selected_comment()
                    .map(|comment| comment.id)
                    .ok_or_else(|| anyhow!("no comment selected"))?;
                self.view.delete_comment(comment_id, task_id).await?;
                self.status_message = format!("comment deleted: {comment_id}");
            }
        }
        self.clamp_selection();
        Ok(())
    }
}

fn clamp_list(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if let Some(selected) = state.selected() {
        if selected >= len {
            state.select(Some(len - 1));
        }
    } else {
        state.select(Some(0));
    }
}
