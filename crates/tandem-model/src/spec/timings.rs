use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Scenario;

/// Simulated durations of the two tasks, in milliseconds.
///
/// Each task waits `*_warmup_ms` before it decides whether to fail, then
/// `*_work_ms` before it returns. `secondary_overrun_ms` is added only when
/// the scenario forces a secondary timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
    pub primary_warmup_ms: u64,
    pub primary_work_ms: u64,
    pub secondary_warmup_ms: u64,
    pub secondary_work_ms: u64,
    pub secondary_overrun_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            primary_warmup_ms: 1_000,
            primary_work_ms: 5_000,
            secondary_warmup_ms: 1_000,
            secondary_work_ms: 7_000,
            secondary_overrun_ms: 5_000,
        }
    }
}

impl Timings {
    #[inline]
    pub fn primary_warmup(&self) -> Duration {
        Duration::from_millis(self.primary_warmup_ms)
    }

    #[inline]
    pub fn primary_work(&self) -> Duration {
        Duration::from_millis(self.primary_work_ms)
    }

    #[inline]
    pub fn secondary_warmup(&self) -> Duration {
        Duration::from_millis(self.secondary_warmup_ms)
    }

    #[inline]
    pub fn secondary_work(&self) -> Duration {
        Duration::from_millis(self.secondary_work_ms)
    }

    #[inline]
    pub fn secondary_overrun(&self) -> Duration {
        Duration::from_millis(self.secondary_overrun_ms)
    }

    /// Total simulated duration of a successful secondary under `scenario`.
    pub fn secondary_total_ms(&self, scenario: &Scenario) -> u64 {
        let overrun = if scenario.force_secondary_timeout {
            self.secondary_overrun_ms
        } else {
            0
        };
        self.secondary_warmup_ms + self.secondary_work_ms + overrun
    }
}
