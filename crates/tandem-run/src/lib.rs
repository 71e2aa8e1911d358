//! Wiring behind the `tandem-run` binary.

use std::{io::Write, sync::Arc};

use tracing::info;

use tandem_core::{Coordinator, Subscribe};
use tandem_model::{CombinedResult, CoordinatorConfig, Scenario, SimulationConfig};
use tandem_observe::Journal;

/// Run the simulated pair once and write the `Final result:` line to `out`.
/// A primary failure returns the error and writes nothing.
pub async fn execute<W: Write>(
    scenario: Scenario,
    config: CoordinatorConfig,
    out: &mut W,
) -> anyhow::Result<CombinedResult> {
    let (primary, secondary) = tandem_exec::simulated_pair(SimulationConfig::new(scenario));
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Journal::new())];
    let coordinator = Coordinator::new(config, primary, secondary)?.with_subscribers(subscribers);

    let cfg = coordinator.config();
    info!(?scenario, pool_size = cfg.pool_size, timeout_ms = cfg.secondary_timeout_ms, "starting");

    let result = coordinator.run().await?;
    writeln!(out, "Final result: {result}")?;
    Ok(result)
}
