//! Batch schedule configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often `schedule` recomputes every owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hours between passes. Defaults to 336 (two weeks).
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
        }
    }
}

impl ScheduleConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }
}

const fn default_interval_hours() -> u64 {
    336
}
