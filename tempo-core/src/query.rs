//! Query expressions for task search
//!
//! A query is a conjunction of typed predicates. The closed variant set lets
//! the evaluator validate and match exhaustively, with no reflection or
//! stringly-typed field names.

use crate::{Priority, QueryError, TaskStatus, Timestamp, PRIORITY_MAX, PRIORITY_MIN};
use serde::{Deserialize, Serialize};

/// A single predicate over one task field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskPredicate {
    /// Task status is one of the listed values.
    Status(Vec<TaskStatus>),
    /// Priority equals the value exactly.
    PriorityIs(Priority),
    /// Priority is at least the value.
    PriorityAtLeast(Priority),
    /// Priority is at most the value.
    PriorityAtMost(Priority),
    /// Task carries every listed tag.
    HasTags(Vec<String>),
    /// Due date at or before the bound. Tasks without a due date never match.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    DueBefore(Timestamp),
    /// Due date at or after the bound. Tasks without a due date never match.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    DueAfter(Timestamp),
    /// Case-insensitive substring match against title or description.
    Text(String),
}

/// Conjunction of zero or more predicates.
///
/// Zero predicates matches every task admitted by the archived filter:
/// archived tasks are excluded unless `include_archived` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskQuery {
    #[serde(default)]
    pub predicates: Vec<TaskPredicate>,
    #[serde(default)]
    pub include_archived: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQuery {
    /// Create an empty query (matches all active tasks).
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            include_archived: false,
        }
    }

    /// Add a status one-of predicate.
    pub fn with_statuses(mut self, statuses: Vec<TaskStatus>) -> Self {
        self.predicates.push(TaskPredicate::Status(statuses));
        self
    }

    /// Add an exact-status predicate.
    pub fn with_status(self, status: TaskStatus) -> Self {
        self.with_statuses(vec![status])
    }

    /// Add an exact-priority predicate.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.predicates.push(TaskPredicate::PriorityIs(priority));
        self
    }

    /// Add a minimum-priority predicate.
    pub fn with_priority_at_least(mut self, priority: Priority) -> Self {
        self.predicates
            .push(TaskPredicate::PriorityAtLeast(priority));
        self
    }

    /// Add a maximum-priority predicate.
    pub fn with_priority_at_most(mut self, priority: Priority) -> Self {
        self.predicates.push(TaskPredicate::PriorityAtMost(priority));
        self
    }

    /// Add a tags predicate; the task must carry every listed tag.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.predicates.push(TaskPredicate::HasTags(tags));
        self
    }

    /// Add an inclusive upper due-date bound.
    pub fn due_before(mut self, bound: Timestamp) -> Self {
        self.predicates.push(TaskPredicate::DueBefore(bound));
        self
    }

    /// Add an inclusive lower due-date bound.
    pub fn due_after(mut self, bound: Timestamp) -> Self {
        self.predicates.push(TaskPredicate::DueAfter(bound));
        self
    }

    /// Add a free-text predicate against title and description.
    pub fn with_text(mut self, term: impl Into<String>) -> Self {
        self.predicates.push(TaskPredicate::Text(term.into()));
        self
    }

    /// Include archived tasks in the result set.
    pub fn including_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Validate the query, rejecting malformed or self-contradictory
    /// predicates. A query that fails here must not be evaluated.
    pub fn validate(&self) -> Result<(), QueryError> {
        let mut latest_after: Option<Timestamp> = None;
        let mut earliest_before: Option<Timestamp> = None;

        for predicate in &self.predicates {
            match predicate {
                TaskPredicate::Status(statuses) => {
                    if statuses.is_empty() {
                        return Err(QueryError::EmptyStatusSet);
                    }
                }
                TaskPredicate::PriorityIs(value)
                | TaskPredicate::PriorityAtLeast(value)
                | TaskPredicate::PriorityAtMost(value) => {
                    if *value < PRIORITY_MIN || *value > PRIORITY_MAX {
                        return Err(QueryError::PriorityOutOfRange { value: *value });
                    }
                }
                TaskPredicate::HasTags(tags) => {
                    if tags.is_empty() {
                        return Err(QueryError::EmptyTagList);
                    }
                }
                TaskPredicate::DueBefore(bound) => {
                    earliest_before = Some(match earliest_before {
                        Some(current) => current.min(*bound),
                        None => *bound,
                    });
                }
                TaskPredicate::DueAfter(bound) => {
                    latest_after = Some(match latest_after {
                        Some(current) => current.max(*bound),
                        None => *bound,
                    });
                }
                TaskPredicate::Text(term) => {
                    if term.trim().is_empty() {
                        return Err(QueryError::BlankTextTerm);
                    }
                }
            }
        }

        // Both bounds are inclusive, so an equal pair is a one-instant window
        if let (Some(after), Some(before)) = (latest_after, earliest_before) {
            if before < after {
                return Err(QueryError::EmptyDueWindow {
                    due_after: after,
                    due_before: before,
                });
            }
        }

        Ok(())
    }
}
