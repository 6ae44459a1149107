use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// Stored and shown as the literal strings `"Open"` and `"Close"`.
/// A task moves between the two only through [`TaskStatus::toggled`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TaskStatus {
    /// Newly created or reopened
    #[default]
    Open,
    /// Marked as done
    Close,
}

impl TaskStatus {
    /// Interprets a raw status string.
    ///
    /// Only the exact literal `"Close"` maps to [`TaskStatus::Close`];
    /// every other value, including garbage, reads as open.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw == "Close" {
            TaskStatus::Close
        } else {
            TaskStatus::Open
        }
    }

    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Open => TaskStatus::Close,
            TaskStatus::Close => TaskStatus::Open,
        }
    }

    /// Computes the new status from the status a client last displayed.
    pub fn toggle_from(displayed: &str) -> Self {
        Self::parse_lenient(displayed).toggled()
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::Close => "Close",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl From<TaskStatus> for &'static str {
    fn from(status: TaskStatus) -> Self {
        status.as_str()
    }
}
