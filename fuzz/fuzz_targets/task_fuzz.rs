//! Fuzz test for TEMPO task record admission
//!
//! This fuzz target deserializes arbitrary byte sequences into task records
//! and runs them through invariant validation and the batch evaluators to
//! find:
//! - Panics or crashes
//! - Infinite loops
//! - Memory safety issues
//!
//! Run with: cargo +nightly fuzz run task_fuzz -- -max_total_time=60

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use tempo_core::{EngineConfig, Task};
use tempo_engine::escalation;
use tempo_engine::retention::RetentionPolicy;

fuzz_target!(|data: &[u8]| {
    // The engine admits records through validate(); anything JSON can
    // produce must either pass or be rejected with a diagnostic, never panic.
    if let Ok(task) = serde_json::from_slice::<Task>(data) {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let valid = task.validate().is_ok();

        let tasks = vec![task];
        let escalated = escalation::evaluate(&tasks, now);
        let policy = RetentionPolicy::new(EngineConfig::default()).unwrap();
        let archival = policy.evaluate(&tasks, now);

        if valid {
            assert!(escalated.rejected.is_empty(), "Valid task was rejected");
            assert!(archival.rejected.is_empty(), "Valid task was rejected");
            // A proposed raise is always a strict raise within the scale
            for change in &escalated.changes {
                assert!(change.suggested > change.previous, "Raise is not strict");
                assert!(change.suggested <= tempo_core::PRIORITY_MAX);
            }
        } else {
            // Invalid records are quarantined, never silently evaluated
            assert!(escalated.changes.is_empty(), "Invalid task was evaluated");
            assert!(archival.archive.is_empty(), "Invalid task was evaluated");
            assert_eq!(escalated.rejected.len(), 1);
            assert_eq!(archival.rejected.len(), 1);
        }
    }
});
