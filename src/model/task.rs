use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned task identifier.
///
/// The API decides the shape (uuid strings, integer keys); the id is kept in
/// whichever JSON form it arrived in and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    /// Parse a user-typed id. Integers become `Number` so they compare equal
    /// to numeric ids decoded from the API.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => TaskId::Number(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}

/// A task as stored by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Raw creation timestamp, exactly as the API sent it
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// A copy of this task with `completed` flipped
    pub fn toggled(&self) -> Task {
        Task {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Creation time for display, falling back to the raw string
    pub fn created_display(&self) -> String {
        display_timestamp(&self.created_at)
    }
}

/// Parse an API timestamp into local time.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`) and naive ISO-8601 without an
/// offset (`2024-01-01T10:30:00.123456`), which is read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}

pub fn display_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Editor form data: what gets sent on create and on edit-submit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        TaskDraft {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        TaskDraft::new(task.title.clone(), task.description.clone())
    }

    /// The only client-side validation: a title with something besides whitespace
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Body of a `PUT /tasks/{id}` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskUpdate {
    /// Title and description from the editor
    Draft(TaskDraft),
    /// Every field of the task, as sent by toggle
    Full(Task),
}

/// Response envelope shared by every API endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub task: Option<Task>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}
