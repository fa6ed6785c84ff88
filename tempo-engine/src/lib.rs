//! TEMPO Engine - Task Lifecycle Evaluators
//!
//! Deterministic rules over task snapshots: priority escalation as deadlines
//! approach, archival of stale completed work, structured queries, and
//! structured briefs/reports.
//!
//! Every operation is a pure, synchronous function over `&[Task]` plus an
//! explicit reference instant. Nothing here performs I/O, reads a clock, or
//! mutates a task; automation outcomes are returned as instruction values
//! the caller applies transactionally.

pub mod escalation;
pub mod query;
pub mod report;
pub mod retention;

pub use escalation::{suggest_priority, EscalationOutcome, PriorityChange};
pub use query::{matches, run_query, urgency_cmp};
pub use report::{DailyBrief, StatusGroup, StatusReport, Summarizer, TaskRef};
pub use retention::{ArchivalOutcome, RetentionPolicy};
