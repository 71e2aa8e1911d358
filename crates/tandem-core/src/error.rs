use thiserror::Error;

use tandem_model::{ModelError, RunState, TimeoutMs};

/// Failure reported by a single task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{reason}")]
    Fail { reason: String },
    #[error("canceled")]
    Canceled,
    /// The task ended without delivering a result (panic or dropped future).
    #[error("task ended without reporting a result")]
    Lost,
}

impl TaskError {
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail {
            reason: reason.into(),
        }
    }
}

/// Why the secondary contribution was dropped.
///
/// Never leaves the coordinator; both variants degrade the result the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecondaryFailure {
    #[error("secondary task failed: {0}")]
    Task(#[source] TaskError),
    #[error("Timeout of operation after {timeout_ms}ms")]
    Timeout { timeout_ms: TimeoutMs },
}

impl SecondaryFailure {
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SecondaryFailure::Timeout { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool size {size} is below the minimum of {min} slots")]
    TooSmall { size: usize, min: usize },
    #[error("pool has been shut down")]
    Closed,
}

/// Errors crossing the coordinator boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// Fatal: the caller is expected to halt.
    #[error("primary task failed: {0}")]
    PrimaryFailed(#[source] TaskError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ModelError),
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("illegal run state transition {from:?} -> {to:?}")]
    InvalidTransition { from: RunState, to: RunState },
}

impl CoordinatorError {
    /// Returns `true` for failures of the primary task.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoordinatorError::PrimaryFailed(_))
    }
}
