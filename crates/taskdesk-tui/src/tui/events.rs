/*
[INPUT]:  Crossterm key codes routed from the run loop
[OUTPUT]: TUI event routing into AppState and TaskListView operations
[POS]:    TUI event module
[UPDATE]: 2026-10-15 Route keys to task list actions instead of strategy controls
[UPDATE]: 2026-10-16 Mirror modal typing into the view drafts
[UPDATE]: 2026-10-19 Keep reading quit/abandon keys while an operation is in flight
*/

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind};
use taskdesk_client::TaskApi;
use tokio::sync::mpsc;

use super::app::{ActiveModal, AppState};
use super::ui::modal::{CommentModal, FormMode, ModalAction, TaskFormModal};

pub(super) enum UiEvent {
    Input(CrosstermEvent),
}

/// How an operation polled by [`drive`] ended
#[derive(Debug)]
pub(super) enum Driven<T> {
    Done(T),
    /// `Esc` dropped the operation before it finished
    Abandoned,
    /// `q` dropped the operation and asked to quit
    Quit,
}

/// Poll `op` to completion while still reading input.
///
/// Other keys pressed while the operation is in flight are discarded.
pub(super) async fn drive<F: Future>(
    op: F,
    input: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Driven<F::Output> {
    tokio::pin!(op);
    let mut input_open = true;
    loop {
        tokio::select! {
            output = &mut op => return Driven::Done(output),
            event = input.recv(), if input_open => match event {
                Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        KeyCode::Char('q') => return Driven::Quit,
                        KeyCode::Esc => return Driven::Abandoned,
                        _ => {}
                    }
                }
                Some(_) => {}
                None => input_open = false,
            },
        }
    }
}

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event<A: TaskApi>(app: &mut AppState<A>, key: KeyCode) -> bool {
    if app.active_modal.is_some() {
        handle_modal_key_event(app, key).await;
        return false;
    }

    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('r') => match app.reload().await {
            Ok(()) => app.status_message = "reloaded".to_string(),
            Err(err) => app.status_message = format!("reload failed: {err}"),
        },
        KeyCode::Char('n') => app.open_create_task(),
        KeyCode::Char('e') => {
            if let Err(err) = app.open_edit() {
                app.status_message = format!("edit failed: {err}");
            }
        }
        KeyCode::Char('c') => {
            if let Err(err) = app.open_comment() {
                app.status_message = format!("comment failed: {err}");
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Err(err) = app.delete_selected().await {
                app.status_message = format!("delete failed: {err}");
            }
        }
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        _ => {}
    }
    false
}

async fn handle_modal_key_event<A: TaskApi>(app: &mut AppState<A>, key: KeyCode) {
    let Some(modal) = app.active_modal.take() else {
        return;
    };

    let keep_open = match modal {
        ActiveModal::TaskForm(mut form) => {
            let action = form.handle_key(key);
            let keep = handle_task_form(app, &form, action).await;
            keep.then_some(ActiveModal::TaskForm(form))
        }
        ActiveModal::Comment(mut form) => {
            let action = form.handle_key(key);
            let keep = handle_comment_form(app, &form, action).await;
            keep.then_some(ActiveModal::Comment(form))
        }
    };

    app.active_modal = keep_open;
    if app.active_modal.is_none() {
        app.clamp_selection();
    }
}

/// Returns `true` while the form should stay open
async fn handle_task_form<A: TaskApi>(
    app: &mut AppState<A>,
    form: &TaskFormModal,
    action: ModalAction,
) -> bool {
    match form.mode() {
        FormMode::Create => {
            app.view.set_draft_title(form.title());
            app.view.set_draft_description(form.description());
        }
        FormMode::Edit(_) => {
            app.view.set_edit_title(form.title());
            app.view.set_edit_description(form.description());
        }
    }

    match (action, form.mode()) {
        (ModalAction::None, _) => true,
        (ModalAction::Cancel, FormMode::Create) => false,
        (ModalAction::Cancel, FormMode::Edit(_)) => {
            app.view.cancel_edit();
            false
        }
        (ModalAction::Submit, FormMode::Create) => match app.view.create_task().await {
            Ok(()) => {
                app.status_message = "task created".to_string();
                false
            }
            Err(err) => {
                app.status_message = format!("create task failed: {err}");
                true
            }
        },
        (ModalAction::Submit, FormMode::Edit(id)) => match app.view.update_task().await {
            Ok(()) => {
                app.status_message = format!("task updated: {id}");
                false
            }
            Err(err) => {
                app.status_message = format!("update task failed: {err}");
                true
            }
        },
    }
}

async fn handle_comment_form<A: TaskApi>(
    app: &mut AppState<A>,
    form: &CommentModal,
    action: ModalAction,
) -> bool {
    if form.comment_id().is_none() {
        app.view.set_comment_draft(form.content());
    }

    match action {
        ModalAction::None => true,
        ModalAction::Cancel => false,
        ModalAction::Submit if form.content().trim().is_empty() => {
            app.status_message = "comment is empty".to_string();
            true
        }
        ModalAction::Submit => {
            let task_id = form.task_id();
            let result = match form.comment_id() {
                Some(comment_id) => {
                    app.view
                        .update_comment(comment_id, task_id, form.content())
                        .await
                }
                None => app.view.add_comment(task_id).await,
            };
            match result {
                Ok(()) => {
                    app.status_message = format!("comments saved on task {task_id}");
                    false
                }
                Err(err) => {
                    app.status_message = format!("comment failed: {err}");
                    true
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use taskdesk_client::{
        ApiCall, Comment, CommentId, InMemoryTaskApi, NewComment, NewTask, Result, Task, TaskId,
    };
    use taskdesk_tui::TaskListView;
    use taskdesk_tui::logging::LogBuffer;
    use tokio::time::timeout;

    use super::*;
    use crate::tui::app::Focus;

    /// Accepts every request and never answers
    struct SilentApi;

    #[async_trait]
    impl TaskApi for SilentApi {
        async fn list_tasks(&self) -> Result<Vec<Task>> {
            std::future::pending().await
        }
        async fn create_task(&self, _task: &NewTask) -> Result<()> {
            std::future::pending().await
        }
        async fn update_task(&self, _task: &Task) -> Result<()> {
            std::future::pending().await
        }
        async fn delete_task(&self, _id: TaskId) -> Result<()> {
            std::future::pending().await
        }
        async fn list_comments(&self, _task_id: TaskId) -> Result<Vec<Comment>> {
            std::future::pending().await
        }
        async fn add_comment(&self, _task_id: TaskId, _comment: &NewComment) -> Result<()> {
            std::future::pending().await
        }
        async fn update_comment(&self, _id: CommentId, _comment: &NewComment) -> Result<()> {
            std::future::pending().await
        }
        async fn delete_comment(&self, _id: CommentId) -> Result<()> {
            std::future::pending().await
        }
    }

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Input(CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    async fn app_with(api: Arc<InMemoryTaskApi>) -> AppState<Arc<InMemoryTaskApi>> {
        let mut app = AppState::new(TaskListView::new(api), LogBuffer::handle(16));
        app.reload().await.expect("reload");
        app
    }

    async fn type_text<A: TaskApi>(app: &mut AppState<A>, text: &str) {
        for ch in text.chars() {
            handle_key_event(app, KeyCode::Char(ch)).await;
        }
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = app_with(Arc::new(InMemoryTaskApi::new())).await;
        assert!(handle_key_event(&mut app, KeyCode::Char('q')).await);
        assert!(!handle_key_event(&mut app, KeyCode::Char('x')).await);
    }

    #[tokio::test]
    async fn test_create_form_submits_draft() {
        let api = Arc::new(InMemoryTaskApi::new());
        let mut app = app_with(api.clone()).await;

        handle_key_event(&mut app, KeyCode::Char('n')).await;
        type_text(&mut app, "Buy milk").await;
        assert_eq!(app.view.draft().title, "Buy milk");

        handle_key_event(&mut app, KeyCode::Tab).await;
        type_text(&mut app, "2%").await;
        handle_key_event(&mut app, KeyCode::Tab).await;
        handle_key_event(&mut app, KeyCode::Enter).await;

        assert!(app.active_modal.is_none());
        assert_eq!(app.status_message, "task created");
        assert_eq!(app.view.tasks().len(), 1);
        assert_eq!(app.view.draft(), &NewTask::default());
        assert!(api.calls().contains(&ApiCall::CreateTask(NewTask::new("Buy milk", "2%"))));
    }

    #[tokio::test]
    async fn test_create_form_stays_open_on_empty_title() {
        let api = Arc::new(InMemoryTaskApi::new());
        let mut app = app_with(api.clone()).await;
        api.clear_calls();

        handle_key_event(&mut app, KeyCode::Char('n')).await;
        handle_key_event(&mut app, KeyCode::Tab).await;
        handle_key_event(&mut app, KeyCode::Tab).await;
        handle_key_event(&mut app, KeyCode::Enter).await;

        assert!(app.active_modal.is_some());
        assert!(app.status_message.starts_with("create task failed"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_edit_form_cancel_leaves_edit_mode() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.seed_task("Old", "");
        let mut app = app_with(api).await;

        handle_key_event(&mut app, KeyCode::Char('e')).await;
        type_text(&mut app, "er").await;
        assert_eq!(app.view.editing().map(|t| t.title.as_str()), Some("Older"));

        handle_key_event(&mut app, KeyCode::Esc).await;
        assert!(app.active_modal.is_none());
        assert!(app.view.editing().is_none());
        assert_eq!(app.view.tasks()[0].title, "Old");
    }

    #[tokio::test]
    async fn test_edit_form_saves_task() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.seed_task("Old", "");
        let mut app = app_with(api).await;

        handle_key_event(&mut app, KeyCode::Char('e')).await;
        type_text(&mut app, "er").await;
        for _ in 0..2 {
            handle_key_event(&mut app, KeyCode::Tab).await;
        }
        handle_key_event(&mut app, KeyCode::Enter).await;

        assert!(app.active_modal.is_none());
        assert_eq!(app.view.tasks()[0].title, "Older");
        assert_eq!(app.status_message, "task updated: 1");
    }

    #[tokio::test]
    async fn test_comment_form_adds_and_edits() {
        let api = Arc::new(InMemoryTaskApi::new());
        let task_id = api.seed_task("Buy milk", "");
        let mut app = app_with(api.clone()).await;

        handle_key_event(&mut app, KeyCode::Char('c')).await;
        handle_key_event(&mut app, KeyCode::Enter).await;
        assert_eq!(app.status_message, "comment is empty");

        type_text(&mut app, "soon").await;
        assert_eq!(app.view.comment_draft(), "soon");
        handle_key_event(&mut app, KeyCode::Enter).await;
        assert!(app.active_modal.is_none());
        assert_eq!(app.view.comments_for(task_id).len(), 1);
        assert_eq!(app.view.comment_draft(), "");

        handle_key_event(&mut app, KeyCode::Tab).await;
        assert_eq!(app.focus, Focus::Comments);
        handle_key_event(&mut app, KeyCode::Char('e')).await;
        type_text(&mut app, "er").await;
        handle_key_event(&mut app, KeyCode::Enter).await;

        assert_eq!(app.view.comments_for(task_id)[0].content, "sooner");
        assert!(api.calls().contains(&ApiCall::UpdateComment(
            CommentId(1),
            NewComment::new("sooner")
        )));
        assert_eq!(app.view.comment_draft(), "");
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.seed_task("Buy milk", "");
        let mut app = app_with(api.clone()).await;
        api.set_offline(true);

        handle_key_event(&mut app, KeyCode::Char('d')).await;
        assert!(app.status_message.starts_with("delete failed"));
        assert_eq!(app.view.tasks().len(), 1);
        assert_eq!(app.view.tasks()[0].id, TaskId(1));
    }

    #[tokio::test]
    async fn test_quit_key_escapes_a_stalled_reload() {
        let mut app = AppState::new(TaskListView::new(SilentApi), LogBuffer::handle(16));
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(key_event(KeyCode::Char('j'))).expect("send");
        tx.send(key_event(KeyCode::Char('q'))).expect("send");

        let outcome = timeout(
            Duration::from_secs(2),
            drive(handle_key_event(&mut app, KeyCode::Char('r')), &mut rx),
        )
        .await
        .expect("input must be read while the reload is pending");

        assert!(matches!(outcome, Driven::Quit));
    }

    #[tokio::test]
    async fn test_esc_abandons_a_stalled_submit() {
        let mut app = AppState::new(TaskListView::new(SilentApi), LogBuffer::handle(16));
        handle_key_event(&mut app, KeyCode::Char('n')).await;
        handle_key_event(&mut app, KeyCode::Char('x')).await;
        handle_key_event(&mut app, KeyCode::Tab).await;
        handle_key_event(&mut app, KeyCode::Tab).await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(key_event(KeyCode::Esc)).expect("send");
        let outcome = timeout(
            Duration::from_secs(2),
            drive(handle_key_event(&mut app, KeyCode::Enter), &mut rx),
        )
        .await
        .expect("input must be read while the submit is pending");
        assert!(matches!(outcome, Driven::Abandoned));

        app.abandon_operation();
        assert_eq!(app.status_message, "request abandoned");
        assert!(app.active_modal.is_none());
        assert_eq!(app.view.draft().title, "x");
    }

    #[tokio::test]
    async fn test_drive_completes_when_input_closes() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.seed_task("Buy milk", "");
        let mut app = AppState::new(TaskListView::new(api), LogBuffer::handle(16));
        let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();
        drop(tx);

        let outcome = drive(handle_key_event(&mut app, KeyCode::Char('r')), &mut rx).await;
        assert!(matches!(outcome, Driven::Done(false)));
        assert_eq!(app.view.tasks().len(), 1);
    }
}
