// Data models for taskboard

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validation::{self, ValidationErrors};

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    /// Attach an id to a draft
    pub fn from_draft(id: impl Into<String>, draft: TaskDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
        }
    }

    /// Due date read as a calendar date, if it is one
    pub fn due_on(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validation::validate_fields(&self.title, &self.description, &self.due_date)
    }
}

/// Task fields without an id, as submitted from a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
}

impl TaskDraft {
    /// New draft due today, Medium priority, In Progress
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: today(),
            priority: Priority::default(),
            status: Status::default(),
        }
    }

    pub fn due(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validation::validate_fields(&self.title, &self.description, &self.due_date)
    }
}

impl From<Task> for TaskDraft {
    fn from(task: Task) -> Self {
        Self {
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ParseFieldError::Priority(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in progress" | "in-progress" | "in_progress" | "inprogress" => Ok(Status::InProgress),
            "completed" | "complete" | "done" => Ok(Status::Completed),
            _ => Err(ParseFieldError::Status(s.to_string())),
        }
    }
}

/// Errors from parsing enumerated field values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFieldError {
    #[error("Invalid priority: {0} (expected High, Medium or Low)")]
    Priority(String),

    #[error("Invalid status: {0} (expected \"In Progress\" or Completed)")]
    Status(String),

    #[error("Invalid sort order: {0} (expected asc or desc)")]
    SortOrder(String),
}

/// Read a due date string as a calendar date.
///
/// Accepts `YYYY-MM-DD` with or without zero padding, and full RFC 3339
/// timestamps (the date part is used). Returns `None` for anything else.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Example tasks used when nothing has been stored yet
pub fn seed_tasks() -> Vec<Task> {
    let seed = [
        (
            "1",
            "Setup project structure",
            "Create the initial project structure with all necessary files",
            "2025-05-12",
            Priority::Medium,
            Status::Completed,
        ),
        (
            "2",
            "Implement search feature",
            "Add search functionality to the dashboard",
            "2025-05-15",
            Priority::High,
            Status::InProgress,
        ),
        (
            "3",
            "Fix navigation bug",
            "Resolve the navigation issue on mobile devices",
            "2025-05-17",
            Priority::Medium,
            Status::InProgress,
        ),
        (
            "4",
            "Update user profile page",
            "Redesign the user profile page with new UI elements",
            "2025-05-18",
            Priority::Low,
            Status::Completed,
        ),
        (
            "5",
            "Optimize database queries",
            "Improve performance of dashboard queries",
            "2025-05-20",
            Priority::Low,
            Status::Completed,
        ),
    ];

    seed.into_iter()
        .map(|(id, title, description, due_date, priority, status)| Task {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            priority,
            status,
        })
        .collect()
}
