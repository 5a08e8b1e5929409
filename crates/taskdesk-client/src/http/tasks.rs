/*
[INPUT]:  Task drafts, edited tasks, task identifiers
[OUTPUT]: Task collection and status-only mutation results
[POS]:    HTTP layer - /api/tasks endpoints
[UPDATE]: When adding new task endpoints or changing response handling
*/

use crate::http::{Result, TaskdeskClient};
use crate::types::{NewTask, Task, TaskId, validate_task};
use reqwest::Method;

impl TaskdeskClient {
    /// List all tasks
    ///
    /// GET /api/tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "/api/tasks")?;
        self.send_json(builder).await
    }

    /// Create a task; the returned entity is not inspected
    ///
    /// POST /api/tasks
    pub async fn create_task(&self, draft: &NewTask) -> Result<()> {
        draft.validate()?;
        let builder = self.request(Method::POST, "/api/tasks")?.json(draft);
        self.send_status(builder).await
    }

    /// Replace a task by identifier with the full edited entity
    ///
    /// PUT /api/tasks/{id}
    pub async fn update_task(&self, task: &Task) -> Result<()> {
        validate_task(task)?;
        let endpoint = format!("/api/tasks/{}", task.id);
        let builder = self.request(Method::PUT, &endpoint)?.json(task);
        self.send_status(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /api/tasks/{id}
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let endpoint = format!("/api/tasks/{id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_status(builder).await
    }
}
