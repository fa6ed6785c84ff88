//! Priority escalation
//!
//! Raises a task's priority as its deadline nears. The rule is monotonic and
//! one-directional: it only ever proposes a raise, never a decrease, so a
//! manual downgrade is not fought and a receding deadline does not demote.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tempo_core::{Priority, Task, TaskDiagnostic, TaskId, TaskStatus, Timestamp};

/// Tasks due within this window (including overdue) escalate to the urgent tier.
pub const URGENT_WINDOW_HOURS: i64 = 24;

/// Tasks due within this window escalate to the elevated tier.
pub const ELEVATED_WINDOW_HOURS: i64 = 72;

/// Priority proposed inside the urgent window.
pub const URGENT_TIER: Priority = 5;

/// Priority proposed inside the elevated window.
pub const ELEVATED_TIER: Priority = 4;

/// A proposed priority raise for one task.
///
/// Carries the previous value so the caller can apply the mutation with an
/// optimistic check and log the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PriorityChange {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub task_id: TaskId,
    pub previous: Priority,
    pub suggested: Priority,
}

/// Result of one escalation pass over a task batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EscalationOutcome {
    /// Priority raises to apply.
    pub changes: Vec<PriorityChange>,
    /// Tasks skipped because they violate a data-model invariant.
    pub rejected: Vec<TaskDiagnostic>,
}

/// Compute the suggested priority for a single task at `now`.
///
/// Returns `None` when there is nothing to raise: no due date, task already
/// done or archived, deadline further out than the widest window, or current
/// priority already at or above the tier the deadline demands. Window
/// boundaries are inclusive on the tighter side, so a task due in exactly
/// 24 hours lands in the urgent tier.
pub fn suggest_priority(task: &Task, now: Timestamp) -> Option<Priority> {
    if task.archived || task.status == TaskStatus::Done {
        return None;
    }
    let due = task.due_date?;

    // Negative remaining (already overdue) falls into the urgent tier
    let remaining = due - now;
    let tier = if remaining <= Duration::hours(URGENT_WINDOW_HOURS) {
        URGENT_TIER
    } else if remaining <= Duration::hours(ELEVATED_WINDOW_HOURS) {
        ELEVATED_TIER
    } else {
        return None;
    };

    (tier > task.priority).then_some(tier)
}

/// Evaluate escalation over a task batch.
///
/// Each task is processed independently: records failing validation are
/// reported as diagnostics without blocking the rest of the batch.
pub fn evaluate(tasks: &[Task], now: Timestamp) -> EscalationOutcome {
    let mut outcome = EscalationOutcome::default();

    for task in tasks {
        if let Err(error) = task.validate() {
            outcome.rejected.push(TaskDiagnostic {
                task_id: task.id,
                error,
            });
            continue;
        }
        if let Some(suggested) = suggest_priority(task, now) {
            outcome.changes.push(PriorityChange {
                task_id: task.id,
                previous: task.priority,
                suggested,
            });
        }
    }

    outcome
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use tempo_test_utils::generators::arb_task;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// A suggestion is always a strict raise within the valid range.
        #[test]
        fn prop_escalation_is_monotonic(task in arb_task(), offset_hours in -200i64..200) {
            let now = tempo_test_utils::fixed_now() + chrono::Duration::hours(offset_hours);
            if let Some(suggested) = suggest_priority(&task, now) {
                prop_assert!(suggested > task.priority);
                prop_assert!(suggested == ELEVATED_TIER || suggested == URGENT_TIER);
            }
        }

        /// Applying the suggestion and re-evaluating at the same instant
        /// yields no further change.
        #[test]
        fn prop_escalation_is_idempotent(task in arb_task(), offset_hours in -200i64..200) {
            let now = tempo_test_utils::fixed_now() + chrono::Duration::hours(offset_hours);
            if let Some(suggested) = suggest_priority(&task, now) {
                let mut applied = task.clone();
                applied.priority = suggested;
                prop_assert_eq!(suggest_priority(&applied, now), None);
            }
        }
    }
}
