//! Identity types for TEMPO entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Task identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type TaskId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 TaskId (timestamp-sortable).
pub fn new_task_id() -> TaskId {
    Uuid::now_v7()
}
