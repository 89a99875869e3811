use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier (creation time in milliseconds, kept unique per list)
pub type TaskId = i64;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty
    pub text: String,
    /// Due date (`YYYY-MM-DD` on disk)
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp, informational only
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, text: String, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            text,
            date,
            completed: false,
            created_at,
        }
    }
}

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    /// Whether a task passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Lowercase name, as stored and accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    /// Next filter in tab order (wraps around)
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Parse a filter name ("all", "pending", "completed")
    pub fn parse_filter(s: &str) -> Option<Filter> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Filter::All),
            "pending" => Some(Filter::Pending),
            "completed" | "done" => Some(Filter::Completed),
            _ => None,
        }
    }
}
