use serde::{Deserialize, Serialize};

use crate::{Scenario, Timings};

/// Input of the simulated primary/secondary tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default)]
    pub scenario: Scenario,
    #[serde(default)]
    pub timings: Timings,
}

impl SimulationConfig {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            timings: Timings::default(),
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Returns `true` if the secondary cannot finish within `timeout_ms`.
    pub fn secondary_overruns(&self, timeout_ms: u64) -> bool {
        self.timings.secondary_total_ms(&self.scenario) > timeout_ms
    }
}
