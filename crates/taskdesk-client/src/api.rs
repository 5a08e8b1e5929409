/*
[INPUT]:  Task/comment operations requested by the view layer
[OUTPUT]: TaskApi trait, HTTP-backed implementation, in-memory implementation
[POS]:    API seam - abstraction over the remote task service
[UPDATE]: When adding operations to the remote task service
[UPDATE]: 2026-10-14 Record calls in InMemoryTaskApi for assertions
*/

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::http::{Result, TaskdeskClient, TaskdeskError};
use crate::types::{Comment, CommentId, NewComment, NewTask, Task, TaskId};

/// Remote task service as seen by the view layer.
///
/// Mutating calls report success or failure only; the server's echo of the
/// mutated entity is never consumed.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    async fn create_task(&self, draft: &NewTask) -> Result<()>;

    async fn update_task(&self, task: &Task) -> Result<()>;

    async fn delete_task(&self, id: TaskId) -> Result<()>;

    async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>>;

    async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()>;

    async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()>;

    async fn delete_comment(&self, id: CommentId) -> Result<()>;
}

#[async_trait]
impl TaskApi for TaskdeskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        TaskdeskClient::list_tasks(self).await
    }

    async fn create_task(&self, draft: &NewTask) -> Result<()> {
        TaskdeskClient::create_task(self, draft).await
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        TaskdeskClient::update_task(self, task).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        TaskdeskClient::delete_task(self, id).await
    }

    async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>> {
        TaskdeskClient::list_comments(self, task_id).await
    }

    async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()> {
        TaskdeskClient::add_comment(self, task_id, comment).await
    }

    async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()> {
        TaskdeskClient::update_comment(self, id, comment).await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        TaskdeskClient::delete_comment(self, id).await
    }
}

#[async_trait]
impl<T: TaskApi + ?Sized> TaskApi for Arc<T> {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        (**self).list_tasks().await
    }

    async fn create_task(&self, draft: &NewTask) -> Result<()> {
        (**self).create_task(draft).await
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        (**self).update_task(task).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        (**self).delete_task(id).await
    }

    async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>> {
        (**self).list_comments(task_id).await
    }

    async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()> {
        (**self).add_comment(task_id, comment).await
    }

    async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()> {
        (**self).update_comment(id, comment).await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        (**self).delete_comment(id).await
    }
}

/// One call observed by [`InMemoryTaskApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListTasks,
    CreateTask(NewTask),
    UpdateTask(Task),
    DeleteTask(TaskId),
    ListComments(TaskId),
    AddComment(TaskId, NewComment),
    UpdateComment(CommentId, NewComment),
    DeleteComment(CommentId),
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    next_task_id: i64,
    next_comment_id: i64,
    offline: bool,
    failing_comment_lists: HashSet<TaskId>,
    calls: Vec<ApiCall>,
}

/// In-process task service that behaves like the real server.
///
/// Used for tests and offline demos; it validates input the way the server
/// does and can be switched into failure modes.
#[derive(Debug, Default)]
pub struct InMemoryTaskApi {
    state: Mutex<InMemoryState>,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task directly, bypassing the call log
    pub fn seed_task(&self, title: &str, description: &str) -> TaskId {
        let mut state = self.lock();
        state.next_task_id += 1;
        let id = TaskId(state.next_task_id);
        state.tasks.push(Task::new(id, title, description));
        id
    }

    /// Insert a comment directly, bypassing the call log
    pub fn seed_comment(&self, task_id: TaskId, content: &str) -> CommentId {
        let mut state = self.lock();
        state.next_comment_id += 1;
        let id = CommentId(state.next_comment_id);
        state.comments.push(Comment::new(id, task_id, content));
        id
    }

    /// Every subsequent call fails with 503 while offline
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Make `list_comments(task_id)` fail until cleared
    pub fn fail_comments_for(&self, task_id: TaskId) {
        self.lock().failing_comment_lists.insert(task_id);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, call: ApiCall) -> Result<MutexGuard<'_, InMemoryState>> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.offline {
            return Err(TaskdeskError::api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "service offline",
            ));
        }
        Ok(state)
    }
}

fn not_found(what: &str) -> TaskdeskError {
    TaskdeskError::api_error(StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(message: &str) -> TaskdeskError {
    TaskdeskError::api_error(StatusCode::BAD_REQUEST, message)
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.begin(ApiCall::ListTasks)?;
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, draft: &NewTask) -> Result<()> {
        let mut state = self.begin(ApiCall::CreateTask(draft.clone()))?;
        if draft.title.is_empty() {
            return Err(bad_request("Title is required"));
        }
        state.next_task_id += 1;
        let id = TaskId(state.next_task_id);
        state
            .tasks
            .push(Task::new(id, draft.title.clone(), draft.description.clone()));
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        let mut state = self.begin(ApiCall::UpdateTask(task.clone()))?;
        if task.title.is_empty() {
            return Err(bad_request("Title is required"));
        }
        let stored = state
            .tasks
            .iter_mut()
            .find(|stored| stored.id == task.id)
            .ok_or_else(|| not_found("Task"))?;
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut state = self.begin(ApiCall::DeleteTask(id))?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Err(not_found("Task"));
        }
        state.comments.retain(|comment| comment.task_id != Some(id));
        Ok(())
    }

    async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>> {
        let state = self.begin(ApiCall::ListComments(task_id))?;
        if state.failing_comment_lists.contains(&task_id) {
            return Err(TaskdeskError::api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "comment query failed",
            ));
        }
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id == Some(task_id))
            .cloned()
            .collect())
    }

    async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()> {
        let mut state = self.begin(ApiCall::AddComment(task_id, comment.clone()))?;
        if !state.tasks.iter().any(|task| task.id == task_id) {
            return Err(not_found("Task"));
        }
        if comment.content.is_empty() {
            return Err(bad_request("Content is required"));
        }
        state.next_comment_id += 1;
        let id = CommentId(state.next_comment_id);
        state
            .comments
            .push(Comment::new(id, task_id, comment.content.clone()));
        Ok(())
    }

    async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()> {
        let mut state = self.begin(ApiCall::UpdateComment(id, comment.clone()))?;
        if comment.content.is_empty() {
            return Err(bad_request("Content is required"));
        }
        let stored = state
            .comments
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| not_found("Comment"))?;
        stored.content = comment.content.clone();
        Ok(())
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let mut state = self.begin(ApiCall::DeleteComment(id))?;
        let before = state.comments.len();
        state.comments.retain(|comment| comment.id != id);
        if state.comments.len() == before {
            return Err(not_found("Comment"));
        }
        Ok(())
    }
}
