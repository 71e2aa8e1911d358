use serde::{Deserialize, Serialize};

/// Switches that force the simulated tasks down a given path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub force_primary_failure: bool,
    #[serde(default)]
    pub force_secondary_failure: bool,
    /// Makes the secondary overrun its timeout.
    #[serde(default)]
    pub force_secondary_timeout: bool,
}

impl Scenario {
    pub fn happy() -> Self {
        Self::default()
    }

    pub fn primary_failure() -> Self {
        Self {
            force_primary_failure: true,
            ..Self::default()
        }
    }

    pub fn secondary_failure() -> Self {
        Self {
            force_secondary_failure: true,
            ..Self::default()
        }
    }

    pub fn secondary_timeout() -> Self {
        Self {
            force_secondary_timeout: true,
            ..Self::default()
        }
    }

    pub fn with_primary_failure(mut self, on: bool) -> Self {
        self.force_primary_failure = on;
        self
    }

    pub fn with_secondary_failure(mut self, on: bool) -> Self {
        self.force_secondary_failure = on;
        self
    }

    pub fn with_secondary_timeout(mut self, on: bool) -> Self {
        self.force_secondary_timeout = on;
        self
    }
}
