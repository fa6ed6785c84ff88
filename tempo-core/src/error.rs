//! Error types for TEMPO operations

use crate::{Priority, TaskId, TaskStatus, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed or self-contradictory query expressions.
///
/// A query that fails validation produces no partial match; the whole
/// operation fails and the caller surfaces the error to the end user.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryError {
    #[error("Priority bound {value} outside valid range")]
    PriorityOutOfRange { value: Priority },

    #[error("Empty due-date window: due_before {due_before} is earlier than due_after {due_after}")]
    EmptyDueWindow {
        due_after: Timestamp,
        due_before: Timestamp,
    },

    #[error("Status predicate lists no statuses")]
    EmptyStatusSet,

    #[error("Tag predicate lists no tags")]
    EmptyTagList,

    #[error("Free-text term is blank")]
    BlankTextTerm,
}

/// Data-model invariant violations.
///
/// Raised when a task record handed to the engine is internally
/// inconsistent. The engine rejects such records instead of repairing them.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Task {task_id}: title is empty or whitespace-only")]
    EmptyTitle { task_id: TaskId },

    #[error("Task {task_id}: title is {length} code points, exceeds maximum")]
    TitleTooLong { task_id: TaskId, length: usize },

    #[error("Task {task_id}: description is {length} code points, exceeds maximum")]
    DescriptionTooLong { task_id: TaskId, length: usize },

    #[error("Task {task_id}: priority {priority} outside valid range")]
    PriorityOutOfRange { task_id: TaskId, priority: Priority },

    #[error("Task {task_id}: status {status} inconsistent with completed_at (present: {has_completed_at})")]
    CompletionTimestampMismatch {
        task_id: TaskId,
        status: TaskStatus,
        has_completed_at: bool,
    },

    #[error("Task {task_id}: archived while status is {status}")]
    ArchivedButNotDone { task_id: TaskId, status: TaskStatus },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all TEMPO operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TempoError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for TEMPO operations.
pub type TempoResult<T> = Result<T, TempoError>;

/// Per-task diagnostic carried in batch outcomes.
///
/// Batch evaluators process each task independently: one invalid record is
/// reported here without blocking evaluation of the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDiagnostic {
    pub task_id: TaskId,
    pub error: ValidationError,
}
