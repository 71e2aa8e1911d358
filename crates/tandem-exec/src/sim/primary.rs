use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use tandem_core::{Task, TaskError};
use tandem_model::SimulationConfig;

use crate::sim::{PRIMARY_FAILURE, PRIMARY_VALUE, pause};

/// Primary side of the simulation: warms up, optionally fails, then works.
pub struct PrimaryTask {
    cfg: SimulationConfig,
}

impl PrimaryTask {
    pub fn new(cfg: SimulationConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl Task for PrimaryTask {
    type Output = String;

    fn name(&self) -> &'static str {
        "primary"
    }

    async fn run(&self, ctx: CancellationToken) -> Result<String, TaskError> {
        let t = &self.cfg.timings;
        info!(target: "tandem.exec.primary", "run the primary async task");

        pause(t.primary_warmup(), &ctx).await?;
        if self.cfg.scenario.force_primary_failure {
            return Err(TaskError::fail(PRIMARY_FAILURE));
        }
        pause(t.primary_work(), &ctx).await?;

        info!(target: "tandem.exec.primary", "primary async task is complete");
        Ok(PRIMARY_VALUE.to_string())
    }
}
