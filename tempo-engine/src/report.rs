//! Summarization and reports
//!
//! Read-only views over a task snapshot: the daily brief (overdue / due-soon
//! counts plus the most urgent open items) and the status report (active
//! tasks grouped by status). Selection reuses the query engine's urgency
//! ordering and the task model's overdue predicate; text rendering is a thin
//! formatting layer over the structured values and adds no selection logic.

use crate::query::urgency_cmp;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tempo_core::{EngineConfig, Priority, Task, TaskId, TaskStatus, TempoResult, Timestamp};

/// Lightweight reference to a task, carried in briefs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskRef {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub task_id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub due_date: Option<Timestamp>,
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
        }
    }
}

/// Structured daily brief computed at a reference instant.
///
/// Groups are restricted to active (non-archived) tasks and ordered by the
/// query engine's urgency contract, most urgent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DailyBrief {
    /// Open tasks past their deadline.
    pub overdue: Vec<TaskRef>,
    /// Open tasks due inside the configured due-soon window.
    pub due_soon: Vec<TaskRef>,
    /// The most urgent open tasks, capped at the configured top-N.
    pub top: Vec<TaskRef>,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    /// Active tasks not yet done.
    pub open_count: usize,
}

impl DailyBrief {
    /// Render the brief in the daily-digest voice.
    pub fn to_text(&self) -> String {
        if self.overdue.is_empty() && self.due_soon.is_empty() {
            return "You're all caught up! No tasks due today.".to_string();
        }

        let mut brief = format!(
            "Good morning! You have {} tasks needing attention today:\n",
            self.overdue_count + self.due_soon_count
        );
        for entry in &self.overdue {
            brief.push_str(&format!("- [{}] {} (Overdue!)\n", entry.priority, entry.title));
        }
        for entry in &self.due_soon {
            brief.push_str(&format!("- [{}] {} (Due today)\n", entry.priority, entry.title));
        }
        brief
    }
}

/// One status bucket of the report, ordered most urgent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusGroup {
    pub status: TaskStatus,
    pub tasks: Vec<TaskRef>,
}

/// Active tasks grouped by status in actionability order:
/// in-progress work first, then the backlog, then (optionally) done work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusReport {
    pub groups: Vec<StatusGroup>,
}

fn status_emoji(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "📅",
        TaskStatus::InProgress => "🚧",
        TaskStatus::Done => "✅",
    }
}

impl StatusReport {
    /// Render the report as a Markdown document, one table per status group.
    pub fn to_markdown(&self) -> String {
        let mut report = String::from("# Task Report\n");

        for group in &self.groups {
            report.push_str(&format!(
                "\n## {} {} ({})\n\n",
                status_emoji(group.status),
                group.status,
                group.tasks.len()
            ));
            report.push_str("| Priority | Title | Due Date |\n");
            report.push_str("| --- | --- | --- |\n");
            for task in &group.tasks {
                let due = match task.due_date {
                    Some(due) => due.format("%Y-%m-%d %H:%M").to_string(),
                    None => "No deadline".to_string(),
                };
                let stars = "⭐".repeat(task.priority.max(0) as usize);
                report.push_str(&format!("| {} | {} | {} |\n", stars, task.title, due));
            }
        }

        report
    }
}

/// Brief and report generator bound to a validated configuration.
///
/// Both operations are side-effect-free: they never mutate tasks and never
/// trigger escalation or archival. Callers wanting fresh priority/archival
/// state run those evaluators explicitly beforehand.
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: EngineConfig,
}

impl Summarizer {
    /// Create a summarizer with the given configuration.
    pub fn new(config: EngineConfig) -> TempoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute the daily brief at `now`.
    pub fn daily_brief(&self, tasks: &[Task], now: Timestamp) -> DailyBrief {
        let mut active: Vec<&Task> = tasks.iter().filter(|task| task.is_active()).collect();
        active.sort_by(|a, b| urgency_cmp(a, b));

        let due_soon_cutoff = now + Duration::hours(self.config.due_soon_hours);

        let overdue: Vec<TaskRef> = active
            .iter()
            .filter(|task| task.is_overdue(now))
            .map(|task| TaskRef::from(*task))
            .collect();

        let due_soon: Vec<TaskRef> = active
            .iter()
            .filter(|task| {
                task.status != TaskStatus::Done
                    && task
                        .due_date
                        .is_some_and(|due| due >= now && due <= due_soon_cutoff)
            })
            .map(|task| TaskRef::from(*task))
            .collect();

        let open: Vec<&&Task> = active
            .iter()
            .filter(|task| task.status != TaskStatus::Done)
            .collect();
        let open_count = open.len();
        let top: Vec<TaskRef> = open
            .into_iter()
            .take(self.config.brief_top_n)
            .map(|task| TaskRef::from(*task))
            .collect();

        DailyBrief {
            overdue_count: overdue.len(),
            due_soon_count: due_soon.len(),
            open_count,
            overdue,
            due_soon,
            top,
        }
    }

    /// Compute the status report over active tasks.
    pub fn status_report(&self, tasks: &[Task], include_done: bool) -> StatusReport {
        let mut statuses = vec![TaskStatus::InProgress, TaskStatus::Todo];
        if include_done {
            statuses.push(TaskStatus::Done);
        }

        let groups = statuses
            .into_iter()
            .map(|status| {
                let mut members: Vec<&Task> = tasks
                    .iter()
                    .filter(|task| task.is_active() && task.status == status)
                    .collect();
                members.sort_by(|a, b| urgency_cmp(a, b));
                StatusGroup {
                    status,
                    tasks: members.into_iter().map(TaskRef::from).collect(),
                }
            })
            .collect();

        StatusReport { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_test_utils::{fixed_now, TaskBuilder};

    fn summarizer() -> Summarizer {
        Summarizer::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            brief_top_n: 0,
            ..EngineConfig::default()
        };
        assert!(Summarizer::new(config).is_err());
    }

    #[test]
    fn test_brief_counts_overdue_and_due_soon() {
        let now = fixed_now();
        let overdue = TaskBuilder::new("Urgent")
            .priority(3)
            .due_in_hours(-1)
            .build();
        let soon = TaskBuilder::new("Soon").priority(2).due_in_hours(2).build();
        let distant = TaskBuilder::new("Distant").due_in_hours(100).build();

        let brief = summarizer().daily_brief(&[overdue.clone(), soon.clone(), distant], now);

        assert_eq!(brief.overdue_count, 1);
        assert_eq!(brief.due_soon_count, 1);
        assert_eq!(brief.open_count, 3);
        assert_eq!(brief.overdue[0].task_id, overdue.id);
        assert_eq!(brief.due_soon[0].task_id, soon.id);
        // Overdue task outranks the rest of the top group here
        assert_eq!(brief.top[0].task_id, overdue.id);
        assert_eq!(brief.top[1].task_id, soon.id);
    }

    #[test]
    fn test_brief_due_soon_window_is_inclusive() {
        let now = fixed_now();
        let at_cutoff = TaskBuilder::new("At cutoff").due_in_hours(24).build();
        let past_cutoff = TaskBuilder::new("Past cutoff")
            .due_at(now + chrono::Duration::hours(24) + chrono::Duration::seconds(1))
            .build();

        let brief = summarizer().daily_brief(&[at_cutoff.clone(), past_cutoff], now);
        assert_eq!(brief.due_soon_count, 1);
        assert_eq!(brief.due_soon[0].task_id, at_cutoff.id);
    }

    #[test]
    fn test_brief_ignores_done_and_archived_tasks() {
        let now = fixed_now();
        let done = TaskBuilder::new("Done")
            .due_in_hours(-5)
            .done_at(now)
            .build();
        let archived = TaskBuilder::new("Archived")
            .due_in_hours(-5)
            .done_at(now - chrono::Duration::days(10))
            .archived()
            .build();
        let open = TaskBuilder::new("Open").due_in_hours(1).build();

        let brief = summarizer().daily_brief(&[done, archived, open.clone()], now);
        assert_eq!(brief.overdue_count, 0);
        assert_eq!(brief.due_soon_count, 1);
        assert_eq!(brief.open_count, 1);
        assert_eq!(brief.top.len(), 1);
        assert_eq!(brief.top[0].task_id, open.id);
    }

    #[test]
    fn test_brief_top_group_is_capped() {
        let now = fixed_now();
        let config = EngineConfig {
            brief_top_n: 2,
            ..EngineConfig::default()
        };
        let summarizer = Summarizer::new(config).unwrap();

        let tasks = vec![
            TaskBuilder::new("A").priority(5).build(),
            TaskBuilder::new("B").priority(4).build(),
            TaskBuilder::new("C").priority(3).build(),
        ];
        let brief = summarizer.daily_brief(&tasks, now);
        assert_eq!(brief.open_count, 3);
        assert_eq!(brief.top.len(), 2);
        assert_eq!(brief.top[0].title, "A");
        assert_eq!(brief.top[1].title, "B");
    }

    #[test]
    fn test_brief_text_rendering() {
        let now = fixed_now();
        let overdue = TaskBuilder::new("Ship release")
            .priority(5)
            .due_in_hours(-2)
            .build();
        let soon = TaskBuilder::new("Review notes")
            .priority(2)
            .due_in_hours(3)
            .build();

        let text = summarizer().daily_brief(&[overdue, soon], now).to_text();
        assert!(text.starts_with("Good morning! You have 2 tasks needing attention today:"));
        assert!(text.contains("- [5] Ship release (Overdue!)"));
        assert!(text.contains("- [2] Review notes (Due today)"));
    }

    #[test]
    fn test_brief_text_all_caught_up() {
        let now = fixed_now();
        let quiet = TaskBuilder::new("Someday").due_in_hours(200).build();
        let text = summarizer().daily_brief(&[quiet], now).to_text();
        assert_eq!(text, "You're all caught up! No tasks due today.");
    }

    #[test]
    fn test_report_groups_in_actionability_order() {
        let now = fixed_now();
        let tasks = vec![
            TaskBuilder::new("Backlog").build(),
            TaskBuilder::new("Rolling").status(TaskStatus::InProgress).build(),
            TaskBuilder::new("Shipped").done_at(now).build(),
        ];

        let report = summarizer().status_report(&tasks, false);
        let statuses: Vec<TaskStatus> = report.groups.iter().map(|group| group.status).collect();
        assert_eq!(statuses, vec![TaskStatus::InProgress, TaskStatus::Todo]);

        let with_done = summarizer().status_report(&tasks, true);
        let statuses: Vec<TaskStatus> =
            with_done.groups.iter().map(|group| group.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::InProgress, TaskStatus::Todo, TaskStatus::Done]
        );
        assert_eq!(with_done.groups[2].tasks.len(), 1);
    }

    #[test]
    fn test_report_orders_groups_by_urgency_and_skips_archived() {
        let now = fixed_now();
        let low = TaskBuilder::new("Low").priority(2).build();
        let high = TaskBuilder::new("High").priority(4).build();
        let archived = TaskBuilder::new("Archived")
            .done_at(now - chrono::Duration::days(10))
            .archived()
            .build();

        let report = summarizer().status_report(&[low.clone(), high.clone(), archived], true);
        let todo_group = &report.groups[1];
        assert_eq!(todo_group.tasks[0].task_id, high.id);
        assert_eq!(todo_group.tasks[1].task_id, low.id);
        let done_group = &report.groups[2];
        assert!(done_group.tasks.is_empty());
    }

    #[test]
    fn test_report_markdown_rendering() {
        let now = fixed_now();
        let tasks = vec![
            TaskBuilder::new("Deploy service")
                .status(TaskStatus::InProgress)
                .priority(3)
                .due_at(now + chrono::Duration::hours(6))
                .build(),
            TaskBuilder::new("Write docs").build(),
        ];

        let markdown = summarizer().status_report(&tasks, false).to_markdown();
        assert!(markdown.starts_with("# Task Report\n"));
        assert!(markdown.contains("## 🚧 in_progress (1)"));
        assert!(markdown.contains("## 📅 todo (1)"));
        assert!(markdown.contains("| Priority | Title | Due Date |"));
        assert!(markdown.contains("| ⭐⭐⭐ | Deploy service | 2025-06-01 18:00 |"));
        assert!(markdown.contains("| ⭐ | Write docs | No deadline |"));
    }
}
