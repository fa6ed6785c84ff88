//! TEMPO Test Utilities
//!
//! Centralized test infrastructure for the TEMPO workspace:
//! - A fixed reference instant so tests never read a clock
//! - A fluent builder for task fixtures
//! - Proptest generators producing invariant-valid tasks

// Re-export core types for convenience
pub use tempo_core::{
    new_task_id, ConfigError, EngineConfig, Priority, QueryError, Task, TaskDiagnostic, TaskId,
    TaskPredicate, TaskQuery, TaskStatus, TempoError, TempoResult, Timestamp, ValidationError,
    DESCRIPTION_MAX_CHARS, PRIORITY_DEFAULT, PRIORITY_MAX, PRIORITY_MIN, TITLE_MAX_CHARS,
};

use chrono::{Duration, TimeZone, Utc};

/// Fixed reference instant shared by fixtures and tests.
/// Every relative helper (`due_in_hours`, generator offsets) anchors here.
pub fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

// ============================================================================
// FIXTURE BUILDER
// ============================================================================

/// Fluent builder for task fixtures.
///
/// Fields default to `Task::new` semantics anchored at `fixed_now()`. The
/// setters are raw field writes so tests can also construct records that
/// violate invariants when exercising diagnostics.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            task: Task::new(title, fixed_now()),
        }
    }

    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.task.created_at = at;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.task.description = Some(description.into());
        self
    }

    /// Raw status write; does not touch `completed_at`. Use `done_at` for a
    /// consistent completed task.
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn due_at(mut self, due: Timestamp) -> Self {
        self.task.due_date = Some(due);
        self
    }

    /// Due date relative to `fixed_now()`; negative hours build an overdue task.
    pub fn due_in_hours(self, hours: i64) -> Self {
        let due = fixed_now() + Duration::hours(hours);
        self.due_at(due)
    }

    /// Mark done with a completion stamp, keeping the invariant intact.
    pub fn done_at(mut self, completed_at: Timestamp) -> Self {
        self.task.status = TaskStatus::Done;
        self.task.completed_at = Some(completed_at);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.task.tags.insert(tag.into());
        self
    }

    pub fn archived(mut self) -> Self {
        self.task.archived = true;
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for TEMPO entity types.
    //!
    //! `arb_task` produces records that satisfy every data-model invariant;
    //! property tests over the evaluators rely on starting from valid input.

    use super::{fixed_now, Duration};
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tempo_core::{Priority, Task, TaskStatus, Timestamp, PRIORITY_MAX, PRIORITY_MIN};

    pub fn arb_priority() -> impl Strategy<Value = Priority> {
        PRIORITY_MIN..=PRIORITY_MAX
    }

    pub fn arb_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Todo),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::Done),
        ]
    }

    /// Timestamps within ±30 days of the fixture instant.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (-720i64..=720).prop_map(|hours| fixed_now() + Duration::hours(hours))
    }

    /// Non-blank titles well under the length bound.
    pub fn arb_title() -> impl Strategy<Value = String> {
        "[a-z]{1,12}( [a-z]{1,12}){0,3}"
    }

    pub fn arb_tags() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set("[a-z]{1,8}", 0..4)
    }

    pub fn arb_task() -> impl Strategy<Value = Task> {
        (
            arb_title(),
            prop::option::of("[a-z ]{0,40}"),
            arb_status(),
            arb_priority(),
            prop::option::of(arb_timestamp()),
            arb_timestamp(),
            arb_timestamp(),
            arb_tags(),
            any::<bool>(),
        )
            .prop_map(
                |(
                    title,
                    description,
                    status,
                    priority,
                    due_date,
                    created_at,
                    completed_at,
                    tags,
                    archive_seed,
                )| {
                    let mut task = Task::new(title, created_at);
                    task.description = description;
                    task.priority = priority;
                    task.due_date = due_date;
                    task.tags = tags;
                    if status == TaskStatus::Done {
                        task.status = TaskStatus::Done;
                        task.completed_at = Some(completed_at);
                        // Only completed tasks may carry the archived flag
                        task.archived = archive_seed;
                    } else {
                        task.status = status;
                    }
                    task
                },
            )
    }
}
