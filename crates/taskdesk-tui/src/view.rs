/*
[INPUT]:  TaskApi implementation, user edits (drafts, edit target, comment text)
[OUTPUT]: TaskListView view model kept in sync with the remote task service
[POS]:    View layer - owns all local task/comment state and every read/write
[UPDATE]: When adding view operations or changing resync behaviour
[UPDATE]: 2026-10-14 Load per-task comments concurrently after a task refetch
[UPDATE]: 2026-10-15 Drop a dangling edit target when its task disappears
*/

//! Local view model for the task list.
//!
//! Local state is never authoritative: every successful mutation is followed
//! by a refetch, of the whole task collection for task mutations and of the
//! affected task's comments for comment mutations. State only changes after
//! the server confirms, so there is nothing to roll back on failure.
//!
//! Every operation logs a diagnostic on failure and also hands the error back
//! so the host UI can decide whether to show it.

use std::collections::HashMap;

use futures_util::future::join_all;
use taskdesk_client::{
    Comment, CommentId, NewComment, NewTask, Result, Task, TaskApi, TaskId, TaskdeskError,
    validate_task,
};
use tracing::{debug, info, warn};

/// Comments keyed by the task they belong to, in server order
pub type CommentsByTask = HashMap<TaskId, Vec<Comment>>;

pub struct TaskListView<A> {
    api: A,
    tasks: Vec<Task>,
    comments: CommentsByTask,
    draft: NewTask,
    editing: Option<Task>,
    comment_draft: String,
}

impl<A: TaskApi> TaskListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            comments: CommentsByTask::new(),
            draft: NewTask::default(),
            editing: None,
            comment_draft: String::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn comments(&self) -> &CommentsByTask {
        &self.comments
    }

    /// Comments for a task; empty when never loaded
    pub fn comments_for(&self, task_id: TaskId) -> &[Comment] {
        self.comments.get(&task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn draft(&self) -> &NewTask {
        &self.draft
    }

    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, task_id: TaskId) -> bool {
        self.editing.as_ref().is_some_and(|task| task.id == task_id)
    }

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_comment_draft(&mut self, content: impl Into<String>) {
        self.comment_draft = content.into();
    }

    /// Make `task_id` the single edit target.
    ///
    /// Any edits in progress on another task are discarded without prompting.
    /// Returns `false` when the task is not in the local list.
    pub fn begin_edit(&mut self, task_id: TaskId) -> bool {
        let Some(task) = self.task(task_id).cloned() else {
            return false;
        };
        if let Some(previous) = self.editing.as_ref().filter(|previous| previous.id != task_id) {
            debug!(discarded = %previous.id, task_id = %task_id, "switching edit target");
        }
        self.editing = Some(task);
        true
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let Some(task) = self.editing.as_mut() {
            task.title = title.into();
        }
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        if let Some(task) = self.editing.as_mut() {
            task.description = description.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Replace the task list and reload every task's comments.
    ///
    /// Comment loads run concurrently and each one only writes its own slot.
    /// A failed task fetch leaves all prior state untouched; a failed comment
    /// fetch leaves only that task's slot untouched.
    pub async fn load_tasks(&mut self) -> Result<()> {
        let tasks = match self.api.list_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "error fetching tasks");
                return Err(err);
            }
        };
        debug!(count = tasks.len(), "tasks loaded");

        self.tasks = tasks;
        let ids: Vec<TaskId> = self.tasks.iter().map(|task| task.id).collect();
        self.comments.retain(|id, _| ids.contains(id));
        if let Some(editing) = self.editing.as_ref().filter(|task| !ids.contains(&task.id)) {
            debug!(task_id = %editing.id, "edit target no longer exists");
            self.editing = None;
        }

        let api = &self.api;
        let results = join_all(
            ids.iter()
                .map(|&task_id| async move { (task_id, api.list_comments(task_id).await) }),
        )
        .await;
        for (task_id, result) in results {
            // Per-task failures were logged by store_comments.
            let _ = self.store_comments(task_id, result);
        }
        Ok(())
    }

    /// Replace the comment entry of one task
    pub async fn load_comments(&mut self, task_id: TaskId) -> Result<()> {
        let result = self.api.list_comments(task_id).await;
        self.store_comments(task_id, result)
    }

    /// Submit the draft task, then resync.
    ///
    /// The draft resets only after the server accepts it.
    pub async fn create_task(&mut self) -> Result<()> {
        if let Err(err) = self.draft.validate() {
            warn!(error = %err, "task draft rejected");
            return Err(err);
        }
        if let Err(err) = self.api.create_task(&self.draft).await {
            warn!(error = %err, "error creating task");
            return Err(err);
        }
        info!(title = %self.draft.title, "task created");
        self.draft = NewTask::default();
        self.resync_tasks().await;
        Ok(())
    }

    /// Submit the edit target in full, then leave edit mode and resync
    pub async fn update_task(&mut self) -> Result<()> {
        let Some(edited) = self.editing.as_ref() else {
            return Err(TaskdeskError::Validation("no task is being edited".to_string()));
        };
        if let Err(err) = validate_task(edited) {
            warn!(task_id = %edited.id, error = %err, "task edit rejected");
            return Err(err);
        }
        if let Err(err) = self.api.update_task(edited).await {
            warn!(task_id = %edited.id, error = %err, "error updating task");
            return Err(err);
        }
        info!(task_id = %edited.id, "task updated");
        self.editing = None;
        self.resync_tasks().await;
        Ok(())
    }

    pub async fn delete_task(&mut self, task_id: TaskId) -> Result<()> {
        if let Err(err) = self.api.delete_task(task_id).await {
            warn!(task_id = %task_id, error = %err, "error deleting task");
            return Err(err);
        }
        info!(task_id = %task_id, "task deleted");
        self.resync_tasks().await;
        Ok(())
    }

    /// Post the shared comment draft on `task_id`.
    ///
    /// Blank drafts are a no-op: nothing is sent and the draft is kept.
    pub async fn add_comment(&mut self, task_id: TaskId) -> Result<()> {
        if self.comment_draft.trim().is_empty() {
            debug!(task_id = %task_id, "blank comment ignored");
            return Ok(());
        }
        let comment = NewComment::new(self.comment_draft.clone());
        if let Err(err) = self.api.add_comment(task_id, &comment).await {
            warn!(task_id = %task_id, error = %err, "error adding comment");
            return Err(err);
        }
        info!(task_id = %task_id, "comment added");
        self.comment_draft.clear();
        self.resync_comments(task_id).await;
        Ok(())
    }

    pub async fn update_comment(
        &mut self,
        comment_id: CommentId,
        task_id: TaskId,
        content: impl Into<String>,
    ) -> Result<()> {
        let comment = NewComment::new(content);
        if let Err(err) = comment.validate() {
            warn!(comment_id = %comment_id, error = %err, "comment edit rejected");
            return Err(err);
        }
        if let Err(err) = self.api.update_comment(comment_id, &comment).await {
            warn!(comment_id = %comment_id, error = %err, "error updating comment");
            return Err(err);
        }
        info!(comment_id = %comment_id, task_id = %task_id, "comment updated");
        self.resync_comments(task_id).await;
        Ok(())
    }

    pub async fn delete_comment(&mut self, comment_id: CommentId, task_id: TaskId) -> Result<()> {
        if let Err(err) = self.api.delete_comment(comment_id).await {
            warn!(comment_id = %comment_id, error = %err, "error deleting comment");
            return Err(err);
        }
        info!(comment_id = %comment_id, task_id = %task_id, "comment deleted");
        self.resync_comments(task_id).await;
        Ok(())
    }

    fn store_comments(&mut self, task_id: TaskId, result: Result<Vec<Comment>>) -> Result<()> {
        match result {
            Ok(comments) => {
                debug!(task_id = %task_id, count = comments.len(), "comments loaded");
                self.comments.insert(task_id, comments);
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %task_id, error = %err, "error fetching comments");
                Err(err)
            }
        }
    }

    // The mutation already succeeded; a failed refetch is logged by load_*.
    async fn resync_tasks(&mut self) {
        let _ = self.load_tasks().await;
    }

    async fn resync_comments(&mut self, task_id: TaskId) {
        let _ = self.load_comments(task_id).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use delayed::DelayedComments;
    use taskdesk_client::{ApiCall, InMemoryTaskApi};

    use super::*;

    fn view_with(api: &Arc<InMemoryTaskApi>) -> TaskListView<Arc<InMemoryTaskApi>> {
        TaskListView::new(Arc::clone(api))
    }

    #[tokio::test]
    async fn test_load_tasks_fetches_comments_for_every_task() {
        let api = Arc::new(InMemoryTaskApi::new());
        let first = api.seed_task("Buy milk", "");
        let second = api.seed_task("Call mom", "Sunday");
        api.seed_comment(first, "2 litres");

        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        assert_eq!(view.tasks().len(), 2);
        assert_eq!(view.comments_for(first).len(), 1);
        assert_eq!(view.comments().get(&second), Some(&Vec::new()));
        let comment_calls = api
            .calls()
            .into_iter()
            .filter(|call| matches!(call, ApiCall::ListComments(_)))
            .count();
        assert_eq!(comment_calls, 2);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_state() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.seed_task("Buy milk", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        api.set_offline(true);
        let err = view.load_tasks().await.expect_err("offline");

        assert_eq!(err.status(), Some(503));
        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.tasks()[0].title, "Buy milk");
    }

    #[tokio::test]
    async fn test_failed_comment_load_only_touches_its_slot() {
        let api = Arc::new(InMemoryTaskApi::new());
        let first = api.seed_task("A", "");
        let second = api.seed_task("B", "");
        api.seed_comment(first, "a1");
        api.seed_comment(second, "b1");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        api.seed_comment(first, "a2");
        api.seed_comment(second, "b2");
        api.fail_comments_for(second);
        view.load_tasks().await.expect("task list still loads");

        assert_eq!(view.comments_for(first).len(), 2);
        assert_eq!(view.comments_for(second).len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title_before_submission() {
        let api = Arc::new(InMemoryTaskApi::new());
        let mut view = view_with(&api);
        view.set_draft_description("orphan description");

        let err = view.create_task().await.expect_err("empty title");

        assert!(err.is_validation());
        assert!(api.calls().is_empty());
        assert_eq!(view.draft().description, "orphan description");
    }

    #[tokio::test]
    async fn test_create_resets_draft_and_resyncs() {
        let api = Arc::new(InMemoryTaskApi::new());
        let mut view = view_with(&api);
        view.set_draft_title("Buy milk");
        view.set_draft_description("");

        view.create_task().await.expect("create");

        assert_eq!(view.draft(), &NewTask::new("", ""));
        assert!(view.tasks().iter().any(|task| task.title == "Buy milk"));
        assert_eq!(api.calls()[0], ApiCall::CreateTask(NewTask::new("Buy milk", "")));
        assert_eq!(api.calls()[1], ApiCall::ListTasks);
    }

    #[tokio::test]
    async fn test_create_failure_preserves_draft() {
        let api = Arc::new(InMemoryTaskApi::new());
        api.set_offline(true);
        let mut view = view_with(&api);
        view.set_draft_title("Buy milk");
        view.set_draft_description("whole");

        view.create_task().await.expect_err("offline");

        assert_eq!(view.draft(), &NewTask::new("Buy milk", "whole"));
    }

    #[tokio::test]
    async fn test_single_edit_target_discards_previous_edits() {
        let api = Arc::new(InMemoryTaskApi::new());
        let a = api.seed_task("A", "first");
        let b = api.seed_task("B", "second");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        assert!(view.begin_edit(a));
        view.set_edit_title("A edited");
        assert!(view.begin_edit(b));

        assert!(view.is_editing(b));
        assert!(!view.is_editing(a));
        assert_eq!(view.editing().map(|task| task.title.as_str()), Some("B"));

        assert!(view.begin_edit(a));
        assert_eq!(view.editing().map(|task| task.title.as_str()), Some("A"));
        assert!(!view.begin_edit(TaskId(999)));
        assert!(view.is_editing(a));
    }

    #[tokio::test]
    async fn test_update_clears_edit_mode_and_resyncs() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Draft report", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        view.begin_edit(id);
        view.set_edit_title("Final report");
        view.set_edit_description("due friday");
        view.update_task().await.expect("update");

        assert!(view.editing().is_none());
        let task = view.task(id).expect("task");
        assert_eq!(task.title, "Final report");
        assert_eq!(task.description, "due friday");
    }

    #[tokio::test]
    async fn test_update_failure_keeps_edit_mode() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Draft report", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");
        view.begin_edit(id);
        view.set_edit_title("Final report");

        api.set_offline(true);
        view.update_task().await.expect_err("offline");

        assert!(view.is_editing(id));
        assert_eq!(view.editing().map(|task| task.title.as_str()), Some("Final report"));
        assert_eq!(view.task(id).map(|task| task.title.as_str()), Some("Draft report"));
    }

    #[tokio::test]
    async fn test_update_without_target_or_title_is_rejected() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Keep", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");
        api.clear_calls();

        assert!(view.update_task().await.expect_err("no target").is_validation());
        view.begin_edit(id);
        view.set_edit_title("  ");
        assert!(view.update_task().await.expect_err("blank title").is_validation());
        assert!(api.calls().is_empty());
        assert!(view.is_editing(id));
    }

    #[tokio::test]
    async fn test_delete_task_drops_comment_entry_on_reload() {
        let api = Arc::new(InMemoryTaskApi::new());
        let keep = api.seed_task("Keep", "");
        let gone = api.seed_task("Gone", "");
        api.seed_comment(gone, "bye");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");
        view.begin_edit(gone);

        view.delete_task(gone).await.expect("delete");

        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.tasks()[0].id, keep);
        assert!(!view.comments().contains_key(&gone));
        assert!(view.editing().is_none());
    }

    #[tokio::test]
    async fn test_blank_comment_is_a_no_op() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Task", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");
        api.clear_calls();

        view.set_comment_draft("   \t");
        view.add_comment(id).await.expect("no-op");

        assert!(api.calls().is_empty());
        assert_eq!(view.comment_draft(), "   \t");
    }

    #[tokio::test]
    async fn test_add_comment_clears_shared_draft_and_reloads_task() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Task", "");
        let other = api.seed_task("Other", "");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");
        api.clear_calls();

        view.set_comment_draft("looks good");
        view.add_comment(id).await.expect("add");

        assert_eq!(view.comment_draft(), "");
        assert_eq!(view.comments_for(id)[0].content, "looks good");
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::AddComment(id, NewComment::new("looks good")),
                ApiCall::ListComments(id),
            ]
        );
        assert!(view.comments_for(other).is_empty());
    }

    #[tokio::test]
    async fn test_add_comment_failure_keeps_draft() {
        let api = Arc::new(InMemoryTaskApi::new());
        let mut view = view_with(&api);
        view.set_comment_draft("lost?");

        view.add_comment(TaskId(404)).await.expect_err("unknown task");

        assert_eq!(view.comment_draft(), "lost?");
    }

    #[tokio::test]
    async fn test_deleting_only_comment_leaves_empty_entry() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Task", "");
        let comment = api.seed_comment(id, "only one");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        view.delete_comment(comment, id).await.expect("delete");

        assert_eq!(view.comments().get(&id), Some(&Vec::new()));
    }

    #[tokio::test]
    async fn test_update_comment_reloads_entry() {
        let api = Arc::new(InMemoryTaskApi::new());
        let id = api.seed_task("Task", "");
        let comment = api.seed_comment(id, "typo");
        let mut view = view_with(&api);
        view.load_tasks().await.expect("load");

        view.update_comment(comment, id, "fixed").await.expect("update");
        assert_eq!(view.comments_for(id)[0].content, "fixed");

        api.clear_calls();
        assert!(view.update_comment(comment, id, "").await.expect_err("blank").is_validation());
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_comment_loads_run_concurrently_and_land_in_own_slots() {
        let inner = Arc::new(InMemoryTaskApi::new());
        let ids: Vec<TaskId> = (1..=4).map(|n| inner.seed_task(&format!("T{n}"), "")).collect();
        for id in &ids {
            inner.seed_comment(*id, &format!("comment for {id}"));
        }
        // Earlier tasks answer last, so completions arrive in reverse order.
        let api = DelayedComments::new(Arc::clone(&inner), Duration::from_millis(100));
        let mut view = TaskListView::new(api);

        let started = tokio::time::Instant::now();
        view.load_tasks().await.expect("load");
        let elapsed = started.elapsed();

        // Delays are 400/300/200/100ms: serial loading would take a full second.
        assert!(elapsed >= Duration::from_millis(400));
        assert!(elapsed < Duration::from_millis(1000));
        for id in &ids {
            let comments = view.comments_for(*id);
            assert_eq!(comments.len(), 1);
            assert_eq!(comments[0].content, format!("comment for {id}"));
        }
    }

    mod delayed {
        use std::sync::Arc;
        use std::time::Duration;

        use async_trait::async_trait;
        use taskdesk_client::{
            Comment, CommentId, InMemoryTaskApi, NewComment, NewTask, Result, Task, TaskApi, TaskId,
        };

        /// Delays each comment list by `step * (5 - id)`
        pub(super) struct DelayedComments {
            inner: Arc<InMemoryTaskApi>,
            step: Duration,
        }

        impl DelayedComments {
            pub(super) fn new(inner: Arc<InMemoryTaskApi>, step: Duration) -> Self {
                Self { inner, step }
            }
        }

        #[async_trait]
        impl TaskApi for DelayedComments {
            async fn list_tasks(&self) -> Result<Vec<Task>> {
                self.inner.list_tasks().await
            }

            async fn create_task(&self, draft: &NewTask) -> Result<()> {
                self.inner.create_task(draft).await
            }

            async fn update_task(&self, task: &Task) -> Result<()> {
                self.inner.update_task(task).await
            }

            async fn delete_task(&self, id: TaskId) -> Result<()> {
                self.inner.delete_task(id).await
            }

            async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>> {
                let factor = u32::try_from(5 - task_id.0.clamp(0, 5)).unwrap_or(0);
                tokio::time::sleep(self.step * factor).await;
                self.inner.list_comments(task_id).await
            }

            async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()> {
                self.inner.add_comment(task_id, comment).await
            }

            async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()> {
                self.inner.update_comment(id, comment).await
            }

            async fn delete_comment(&self, id: CommentId) -> Result<()> {
                self.inner.delete_comment(id).await
            }
        }
    }
}
