//! Fuzz test for TEMPO query evaluation
//!
//! This fuzz target feeds arbitrary byte sequences through query
//! deserialization and evaluation to find:
//! - Panics or crashes
//! - Infinite loops
//! - Memory safety issues
//!
//! Run with: cargo +nightly fuzz run query_fuzz -- -max_total_time=60

#![no_main]

use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use tempo_core::{Task, TaskQuery, TaskStatus};
use tempo_engine::run_query;

fn snapshot() -> Vec<Task> {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let mut tasks = Vec::new();

    let mut dated = Task::new("deploy pipeline", now).with_priority(4);
    dated.due_date = Some(now + Duration::hours(6));
    dated.tags.insert("release".to_string());
    tasks.push(dated);

    let mut rolling = Task::new("review notes", now - Duration::hours(3));
    rolling.status = TaskStatus::InProgress;
    tasks.push(rolling);

    let mut retired = Task::new("old chore", now - Duration::days(30));
    retired.set_status(TaskStatus::Done, now - Duration::days(10));
    retired.archived = true;
    tasks.push(retired);

    tasks
}

fuzz_target!(|data: &[u8]| {
    // Any byte sequence that deserializes into a query must evaluate
    // without panicking: either a ranked result or a validation error.
    if let Ok(query) = serde_json::from_slice::<TaskQuery>(data) {
        let tasks = snapshot();
        match run_query(&tasks, &query) {
            Ok(result) => {
                // Basic invariants that should always hold:
                // 1. The result is a subset of the input
                assert!(result.len() <= tasks.len(), "Result larger than input");

                // 2. Archived tasks only appear when the query opts in
                if !query.include_archived {
                    assert!(
                        result.iter().all(|task| !task.archived),
                        "Archived task leaked into default view"
                    );
                }
            }
            Err(_) => {
                // A malformed query fails whole; re-running must agree
                assert!(
                    query.validate().is_err(),
                    "run_query rejected a query that validates"
                );
            }
        }
    }
});
