//! # Todo Model
//!
//! The canonical todo entity and its closed status/priority enumerations.
//!
//! ## Overview
//!
//! `Todo` is the authoritative shape owned by the primary store. The cache
//! holds a derived, flattened projection of the same fields and may be
//! rebuilt or flushed at any time without data loss.
//!
//! ## Database Schema
//!
//! Maps to the `todos` table:
//! - `id`: primary key (BIGSERIAL), store-assigned, immutable
//! - `task`: description text, non-empty at creation
//! - `status`: one of `created`, `processing`, `done`
//! - `priority`: one of `low`, `medium`, `high`; immutable after creation
//! - `created_at`, `updated_at`: store-assigned timestamps
//!
//! Status and priority are validated once at the service boundary and travel
//! through the storage layers as enums, never as free-form strings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Initial state when a todo is created.
    Created,
    /// Todo is currently being worked on.
    Processing,
    /// Todo is finished. Done todos sort last and rank at zero.
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Processing => write!(f, "processing"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "processing" => Ok(Self::Processing),
            "done" => Ok(Self::Done),
            _ => Err(format!("invalid status: {s}")),
        }
    }
}

/// Task priority. Set at creation and never changed by updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("invalid priority: {s}")),
        }
    }
}

/// A todo as owned by the primary store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated todo ready for insertion (without store-generated fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub task: String,
    pub status: Status,
    pub priority: Priority,
}

/// Raw creation input. `priority` is parsed and validated by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub task: String,
    pub priority: String,
}

/// Partial update input. Unset or empty fields keep the current value;
/// priority and creation time are never touched by an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub id: i64,
    pub task: Option<String>,
    pub status: Option<String>,
}

/// List query constraints. Absent fields mean "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoFilter {
    /// Case-sensitive substring match against the task description.
    pub task: Option<String>,
    /// Exact status match.
    pub status: Option<Status>,
}

impl TodoFilter {
    /// Check whether a todo satisfies this filter.
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(task) = &self.task {
            if !todo.task.contains(task.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if todo.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [Status::Created, Status::Processing, Status::Done] {
            let parsed: Status = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("pending".parse::<Status>().is_err());
    }

    #[test]
    fn test_priority_round_trip() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            let parsed: Priority = priority.to_string().parse().unwrap();
            assert_eq!(parsed, priority);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_filter_substring_is_case_sensitive() {
        let todo = Todo {
            id: 1,
            task: "Write weekly report".to_string(),
            status: Status::Created,
            priority: Priority::Medium,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let filter = TodoFilter {
            task: Some("report".to_string()),
            status: None,
        };
        assert!(filter.matches(&todo));

        let filter = TodoFilter {
            task: Some("Report".to_string()),
            status: None,
        };
        assert!(!filter.matches(&todo));
    }

    #[test]
    fn test_filter_status_exact_match() {
        let todo = Todo {
            id: 1,
            task: "x".to_string(),
            status: Status::Processing,
            priority: Priority::Low,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let filter = TodoFilter {
            task: None,
            status: Some(Status::Processing),
        };
        assert!(filter.matches(&todo));

        let filter = TodoFilter {
            task: None,
            status: Some(Status::Done),
        };
        assert!(!filter.matches(&todo));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let todo = Todo {
            id: 1,
            task: "anything".to_string(),
            status: Status::Done,
            priority: Priority::High,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(TodoFilter::default().matches(&todo));
    }
}
