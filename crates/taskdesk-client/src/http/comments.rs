/*
[INPUT]:  Task identifiers, comment identifiers, comment bodies
[OUTPUT]: Per-task comment lists and status-only mutation results
[POS]:    HTTP layer - comment endpoints
[UPDATE]: When adding new comment endpoints or changing response handling
[UPDATE]: 2026-10-14 Add PUT /api/comments/{id}
*/

use crate::http::{Result, TaskdeskClient};
use crate::types::{Comment, CommentId, NewComment, TaskId};
use reqwest::Method;

impl TaskdeskClient {
    /// List comments attached to one task
    ///
    /// GET /api/tasks/{id}/comments
    pub async fn list_comments(&self, task_id: TaskId) -> Result<Vec<Comment>> {
        let endpoint = format!("/api/tasks/{task_id}/comments");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Attach a comment to a task
    ///
    /// POST /api/tasks/{id}/comments
    pub async fn add_comment(&self, task_id: TaskId, comment: &NewComment) -> Result<()> {
        comment.validate()?;
        let endpoint = format!("/api/tasks/{task_id}/comments");
        let builder = self.request(Method::POST, &endpoint)?.json(comment);
        self.send_status(builder).await
    }

    /// Replace the content of a comment
    ///
    /// PUT /api/comments/{id}
    pub async fn update_comment(&self, id: CommentId, comment: &NewComment) -> Result<()> {
        comment.validate()?;
        let endpoint = format!("/api/comments/{id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(comment);
        self.send_status(builder).await
    }

    /// Delete a comment
    ///
    /// DELETE /api/comments/{id}
    pub async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let endpoint = format!("/api/comments/{id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_status(builder).await
    }
}
