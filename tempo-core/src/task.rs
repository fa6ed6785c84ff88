//! Task record model
//!
//! The sole entity of the engine. Tasks are read-mostly input: the evaluator
//! crates never mutate them in place, they return proposed new values so the
//! caller controls persistence atomically.

use crate::{TaskId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task priority. Valid values are `PRIORITY_MIN..=PRIORITY_MAX`.
pub type Priority = i32;

/// Lowest valid priority.
pub const PRIORITY_MIN: Priority = 1;

/// Highest valid priority.
pub const PRIORITY_MAX: Priority = 5;

/// Priority assigned to newly created tasks.
pub const PRIORITY_DEFAULT: Priority = 1;

/// Maximum title length in Unicode code points.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in Unicode code points.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        };
        write!(f, "{}", label)
    }
}

/// Task - the single record type every evaluator operates on.
///
/// Archival is a soft, reversible state change: archived tasks are excluded
/// from active views but never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub due_date: Option<Timestamp>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub completed_at: Option<Timestamp>,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub tags: BTreeSet<String>,
    pub archived: bool,
}

impl Task {
    /// Create a new task with defaults: `Todo` status, lowest priority,
    /// no deadline, not archived. `created_at` is supplied by the caller;
    /// the engine never reads a system clock.
    pub fn new(title: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id: crate::new_task_id(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: PRIORITY_DEFAULT,
            due_date: None,
            created_at,
            completed_at: None,
            tags: BTreeSet::new(),
            archived: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the tags. Duplicates collapse in the set representation.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Transition to a new status, keeping `completed_at` consistent:
    /// entering `Done` stamps it with `now`, leaving `Done` clears it,
    /// re-asserting `Done` keeps the original completion time.
    pub fn set_status(&mut self, status: TaskStatus, now: Timestamp) {
        match (self.status, status) {
            (TaskStatus::Done, TaskStatus::Done) => {}
            (_, TaskStatus::Done) => self.completed_at = Some(now),
            (TaskStatus::Done, _) => self.completed_at = None,
            _ => {}
        }
        self.status = status;
    }

    /// Whether this task appears in active views.
    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Whether this task is past its deadline and still open.
    /// Tasks without a due date are never overdue.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status != TaskStatus::Done,
            None => false,
        }
    }

    /// Check the data-model invariants, returning the first violation found.
    ///
    /// The engine rejects invalid records rather than silently fixing them;
    /// batch evaluators surface the violation as a per-task diagnostic.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle { task_id: self.id });
        }

        let title_chars = self.title.chars().count();
        if title_chars > TITLE_MAX_CHARS {
            return Err(ValidationError::TitleTooLong {
                task_id: self.id,
                length: title_chars,
            });
        }

        if let Some(description) = &self.description {
            let description_chars = description.chars().count();
            if description_chars > DESCRIPTION_MAX_CHARS {
                return Err(ValidationError::DescriptionTooLong {
                    task_id: self.id,
                    length: description_chars,
                });
            }
        }

        if self.priority < PRIORITY_MIN || self.priority > PRIORITY_MAX {
            return Err(ValidationError::PriorityOutOfRange {
                task_id: self.id,
                priority: self.priority,
            });
        }

        if self.completed_at.is_some() != (self.status == TaskStatus::Done) {
            return Err(ValidationError::CompletionTimestampMismatch {
                task_id: self.id,
                status: self.status,
                has_completed_at: self.completed_at.is_some(),
            });
        }

        if self.archived && self.status != TaskStatus::Done {
            return Err(ValidationError::ArchivedButNotDone {
                task_id: self.id,
                status: self.status,
            });
        }

        Ok(())
    }
}
