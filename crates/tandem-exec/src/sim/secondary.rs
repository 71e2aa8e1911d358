use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use tandem_core::{Task, TaskError};
use tandem_model::SimulationConfig;

use crate::sim::{SECONDARY_FAILURE, SECONDARY_VALUE, pause};

/// Secondary side of the simulation.
///
/// With `force_secondary_timeout` the task sleeps an extra overrun, long
/// enough for the coordinator's timeout to win the race.
pub struct SecondaryTask {
    cfg: SimulationConfig,
}

impl SecondaryTask {
    pub fn new(cfg: SimulationConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl Task for SecondaryTask {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "secondary"
    }

    async fn run(&self, ctx: CancellationToken) -> Result<Option<String>, TaskError> {
        let t = &self.cfg.timings;
        info!(target: "tandem.exec.secondary", "run the secondary async task");

        pause(t.secondary_warmup(), &ctx).await?;
        if self.cfg.scenario.force_secondary_failure {
            return Err(TaskError::fail(SECONDARY_FAILURE));
        }
        pause(t.secondary_work(), &ctx).await?;
        if self.cfg.scenario.force_secondary_timeout {
            pause(t.secondary_overrun(), &ctx).await?;
        }

        info!(target: "tandem.exec.secondary", "secondary async task is complete");
        Ok(Some(SECONDARY_VALUE.to_string()))
    }
}
