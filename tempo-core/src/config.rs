//! Engine configuration

use crate::{ConfigError, TempoError, TempoResult};
use serde::{Deserialize, Serialize};

/// Tunable knobs for the lifecycle evaluators.
///
/// Escalation thresholds are deliberately not configurable; they are fixed
/// policy constants in the escalation module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Completed tasks older than this many days become archivable.
    pub archive_after_days: i64,
    /// Width of the daily brief's "due soon" window, in hours.
    pub due_soon_hours: i64,
    /// Number of tasks listed in the daily brief's top group.
    pub brief_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            archive_after_days: 7,
            due_soon_hours: 24,
            brief_top_n: 5,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(TempoError::Config) if invalid.
    pub fn validate(&self) -> TempoResult<()> {
        if self.archive_after_days <= 0 {
            return Err(TempoError::Config(ConfigError::InvalidValue {
                field: "archive_after_days".to_string(),
                value: self.archive_after_days.to_string(),
                reason: "archive_after_days must be greater than 0".to_string(),
            }));
        }

        if self.due_soon_hours <= 0 {
            return Err(TempoError::Config(ConfigError::InvalidValue {
                field: "due_soon_hours".to_string(),
                value: self.due_soon_hours.to_string(),
                reason: "due_soon_hours must be greater than 0".to_string(),
            }));
        }

        if self.brief_top_n == 0 {
            return Err(TempoError::Config(ConfigError::InvalidValue {
                field: "brief_top_n".to_string(),
                value: self.brief_top_n.to_string(),
                reason: "brief_top_n must be greater than 0".to_string(),
            }));
        }

        Ok(())
    }
}
