/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - task and comment DTOs returned by the server
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-12 Tolerate null descriptions and missing timestamps
*/

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_empty")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default, deserialize_with = "serde_helpers::null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Comment {
    pub fn new(id: CommentId, task_id: TaskId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            task_id: Some(task_id),
            created_at: None,
            updated_at: None,
        }
    }
}

mod serde_helpers {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Accepts naive ISO-8601 (`2024-01-01T10:00:00.123456`) or RFC 3339.
    /// Unparseable values become `None`; timestamps are informational only.
    pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(naive) = raw.parse::<NaiveDateTime>() {
            return Ok(Some(naive));
        }
        Ok(DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|parsed| parsed.naive_utc()))
    }
}
