//! Query evaluation
//!
//! Evaluates a validated `TaskQuery` (conjunction of typed predicates)
//! against a task snapshot and returns the matches in urgency order. The
//! ordering is a design contract shared with the summarizer, not an
//! incidental default: priority descending, due date ascending with undated
//! tasks last, creation time ascending, id ascending.

use std::cmp::Ordering;
use tempo_core::{Task, TaskPredicate, TaskQuery, TempoResult};

/// Total, stable urgency ordering over tasks.
///
/// Ties on every key are impossible because ids are unique, so the order is
/// reproducible for any task set.
pub fn urgency_cmp(a: &Task, b: &Task) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn predicate_matches(task: &Task, predicate: &TaskPredicate) -> bool {
    match predicate {
        TaskPredicate::Status(statuses) => statuses.contains(&task.status),
        TaskPredicate::PriorityIs(value) => task.priority == *value,
        TaskPredicate::PriorityAtLeast(value) => task.priority >= *value,
        TaskPredicate::PriorityAtMost(value) => task.priority <= *value,
        TaskPredicate::HasTags(tags) => tags.iter().all(|tag| task.tags.contains(tag)),
        TaskPredicate::DueBefore(bound) => match task.due_date {
            Some(due) => due <= *bound,
            None => false,
        },
        TaskPredicate::DueAfter(bound) => match task.due_date {
            Some(due) => due >= *bound,
            None => false,
        },
        TaskPredicate::Text(term) => {
            let needle = term.to_lowercase();
            task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        }
    }
}

/// Whether a task satisfies every predicate of a query.
///
/// Archived tasks never match unless the query opts in, regardless of the
/// other predicates. The query is assumed validated; `run_query` validates
/// before evaluating.
pub fn matches(task: &Task, query: &TaskQuery) -> bool {
    if task.archived && !query.include_archived {
        return false;
    }
    query
        .predicates
        .iter()
        .all(|predicate| predicate_matches(task, predicate))
}

/// Run a query against a task snapshot.
///
/// Validates the query first; a malformed query fails whole with no partial
/// match. Matches are returned in urgency order.
pub fn run_query<'a>(tasks: &'a [Task], query: &TaskQuery) -> TempoResult<Vec<&'a Task>> {
    query.validate()?;

    let mut result: Vec<&Task> = tasks.iter().filter(|task| matches(task, query)).collect();
    result.sort_by(|a, b| urgency_cmp(a, b));
    Ok(result)
}
