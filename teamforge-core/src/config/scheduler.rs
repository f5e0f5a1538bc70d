//! Team formation scheduler configuration.

use std::time::Duration;

/// Default period between two formation passes.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period of the trigger. Also the width of the eligibility window, so
    /// every deadline falls into exactly one tick while ticks are on time.
    pub tick_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
