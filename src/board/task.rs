//! Task records shown on the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::Status;

/// Kind of work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    /// A defect.
    Bug,
    /// A plain unit of work.
    #[default]
    Task,
    /// A user story.
    Story,
    /// A large body of work spanning stories.
    Epic,
}

impl TaskType {
    fn as_str(self) -> &'static str {
        match self {
            TaskType::Bug => "bug",
            TaskType::Task => "task",
            TaskType::Story => "story",
            TaskType::Epic => "epic",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(TaskType::Bug),
            "task" => Ok(TaskType::Task),
            "story" => Ok(TaskType::Story),
            "epic" => Ok(TaskType::Epic),
            other => Err(format!("unknown task type '{other}' (expected bug, task, story or epic)")),
        }
    }
}

/// Task priority, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    /// Drop everything.
    Highest,
    /// Next up.
    High,
    /// Normal.
    #[default]
    Medium,
    /// Can wait.
    Low,
    /// Someday.
    Lowest,
}

impl Priority {
    /// Backend priority code (`prioridadId`).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Priority::Highest => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
            Priority::Lowest => 5,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Priority::Highest => "highest",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Lowest => "lowest",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highest" => Ok(Priority::Highest),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "lowest" => Ok(Priority::Lowest),
            other => Err(format!(
                "unknown priority '{other}' (expected highest, high, medium, low or lowest)"
            )),
        }
    }
}

/// Person a task is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Full name.
    pub name: String,
    /// Initials shown when there is no avatar.
    pub initials: String,
    /// Avatar image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A single task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique id. The backend sends numbers; they are kept as strings.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Title line. A missing or null title reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Kind of work item.
    #[serde(rename = "type", default, deserialize_with = "lenient_task_type")]
    pub task_type: TaskType,
    /// Priority.
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,
    /// Workflow status; always equal to the id of the holding column.
    ///
    /// Written out but never read back: the column a task is listed under
    /// decides its status.
    #[serde(default, skip_deserializing)]
    pub status: Status,
    /// Assignee, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
}

impl Task {
    /// Creates an unassigned medium-priority task.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: Status) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_type: TaskType::default(),
            priority: Priority::default(),
            status,
            assignee: None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  ({}, {})", self.id, self.title, self.task_type, self.priority)?;
        if let Some(assignee) = &self.assignee {
            write!(f, "  @{}", assignee.initials)?;
        }
        Ok(())
    }
}

pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_task_type<'de, D>(deserializer: D) -> Result<TaskType, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(TaskType::default());
    };
    Ok(raw.to_lowercase().parse().unwrap_or_else(|_| {
        debug!(task_type = %raw, "unrecognized task type, using task");
        TaskType::Task
    }))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(Priority::default());
    };
    Ok(raw.to_lowercase().parse().unwrap_or_else(|_| {
        debug!(priority = %raw, "unrecognized priority, using medium");
        Priority::default()
    }))
}
