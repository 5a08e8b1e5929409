/*
[INPUT]:  Draft input from the view layer
[OUTPUT]: Typed request bodies with client-side required-field checks
[POS]:    Data layer - request bodies for mutating endpoints
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::Task;
use crate::http::{Result, TaskdeskError};

/// Body of `POST /api/tasks`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_title(&self.title)
    }
}

/// Body of `POST /api/tasks/{id}/comments` and `PUT /api/comments/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(TaskdeskError::validation("comment content is required"));
        }
        Ok(())
    }
}

/// Full task sent by `PUT /api/tasks/{id}` must still carry a title
pub fn validate_task(task: &Task) -> Result<()> {
    require_title(&task.title)
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskdeskError::validation("task title is required"));
    }
    Ok(())
}
