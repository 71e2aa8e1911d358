use tandem_model::{CoordinatorConfig, Scenario};
use tandem_observe::{LoggerConfig, logger_init};

// Flip these to walk the failure paths.
const FORCE_PRIMARY_FAILURE: bool = false;
const FORCE_SECONDARY_FAILURE: bool = false;
const FORCE_SECONDARY_TIMEOUT: bool = false;

// text, json or journald (the last needs the `journald` feature).
const LOG_FORMAT: &str = "text";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger_init(&LoggerConfig::default().with_format(LOG_FORMAT.parse()?))?;

    let scenario = Scenario {
        force_primary_failure: FORCE_PRIMARY_FAILURE,
        force_secondary_failure: FORCE_SECONDARY_FAILURE,
        force_secondary_timeout: FORCE_SECONDARY_TIMEOUT,
    };

    // A primary failure leaves through `?`: the pool is already released and
    // the process exits non-zero without a final line.
    tandem_run::execute(scenario, CoordinatorConfig::default(), &mut std::io::stdout()).await?;
    Ok(())
}
