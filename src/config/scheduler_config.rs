use serde::{Deserialize, Serialize};

/// Configuration for the task scheduler.
#[derive(Deserialize, Serialize, Debug, Clone, Hash, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Indicates whether persisted tasks should be re-armed at startup.
    pub enabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
