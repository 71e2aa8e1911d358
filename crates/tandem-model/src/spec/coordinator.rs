use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ModelError, TimeoutMs};

/// Smallest pool that can hold the primary, the secondary and the timeout at once.
pub const MIN_POOL_SIZE: usize = 3;

/// Settings of the task coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorConfig {
    /// Number of concurrent execution slots.
    pub pool_size: usize,
    /// How long the secondary task may run before it is treated as failed.
    pub secondary_timeout_ms: TimeoutMs,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            secondary_timeout_ms: 10_000,
        }
    }
}

impl CoordinatorConfig {
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    pub fn with_secondary_timeout_ms(mut self, ms: TimeoutMs) -> Self {
        self.secondary_timeout_ms = ms;
        self
    }

    #[inline]
    pub fn secondary_timeout(&self) -> Duration {
        Duration::from_millis(self.secondary_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.pool_size < MIN_POOL_SIZE {
            return Err(ModelError::PoolTooSmall {
                size: self.pool_size,
                min: MIN_POOL_SIZE,
            });
        }
        if self.secondary_timeout_ms == 0 {
            return Err(ModelError::ZeroTimeout);
        }
        Ok(())
    }
}
