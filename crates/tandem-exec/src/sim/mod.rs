//! Simulated primary and secondary tasks.
//!
//! Durations come from [`Timings`](tandem_model::Timings); the [`Scenario`](tandem_model::Scenario)
//! switches force a failure after the warmup or stretch the secondary past
//! its timeout.

use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use tandem_core::{TaskError, TaskRef};
use tandem_model::SimulationConfig;

mod primary;
pub use primary::PrimaryTask;

mod secondary;
pub use secondary::SecondaryTask;

pub const PRIMARY_VALUE: &str = "Primary";
pub const SECONDARY_VALUE: &str = "Secondary";

pub const PRIMARY_FAILURE: &str = "Whoops, here is an error in the primary task";
pub const SECONDARY_FAILURE: &str = "Whoops, here is an error in the secondary task";

/// Build both simulated tasks from one config.
pub fn simulated_pair(cfg: SimulationConfig) -> (TaskRef<String>, TaskRef<Option<String>>) {
    (
        Arc::new(PrimaryTask::new(cfg)),
        Arc::new(SecondaryTask::new(cfg)),
    )
}

/// Sleep for `d` unless `ctx` is cancelled first.
async fn pause(d: Duration, ctx: &CancellationToken) -> Result<(), TaskError> {
    if d.is_zero() {
        return Ok(());
    }
    tokio::select! {
        _ = tokio::time::sleep(d) => Ok(()),
        _ = ctx.cancelled() => Err(TaskError::Canceled),
    }
}
