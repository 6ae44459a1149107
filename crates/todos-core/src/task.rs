use serde::{Deserialize, Serialize};

use crate::status::TaskStatus;

/// A single tracked task.
///
/// Serializes to the persisted document shape:
/// `{ "_id": <string>, "title": <string>, "status": "Open" | "Close" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Caller-supplied key, unique within the store
    #[serde(rename = "_id")]
    pub id: String,
    /// Free-text title
    pub title: String,
    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new task. New tasks always start open.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Open,
        }
    }
}
