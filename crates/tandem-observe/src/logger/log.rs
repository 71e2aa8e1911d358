use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, MakeWriter, time::OffsetTime},
    layer::{Layered, SubscriberExt},
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// A fully assembled subscriber, ready to install globally or per thread.
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

type Filtered = Layered<EnvFilter, Registry>;

/// Assemble the subscriber `cfg` describes. Formatted records go to `writer`;
/// journald output talks to the journal socket and ignores it.
pub fn build_subscriber<W>(cfg: &LoggerConfig, writer: W) -> Result<BoxedSubscriber, LoggerError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::registry().with(filter(&cfg.level)?);

    match cfg.format {
        LoggerFormat::Text => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(cfg.use_color)
                .with_target(cfg.with_targets)
                .with_timer(local_rfc3339());
            Ok(Box::new(base.with(layer)))
        }
        LoggerFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(local_rfc3339());
            Ok(Box::new(base.with(layer)))
        }
        LoggerFormat::Journald => journald(base),
    }
}

fn filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|source| LoggerError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

fn local_rfc3339() -> OffsetTime<Rfc3339> {
    // The local offset is unknowable once threads exist on some platforms.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald(base: Filtered) -> Result<BoxedSubscriber, LoggerError> {
    let layer = tracing_journald::layer().map_err(LoggerError::Journald)?;
    Ok(Box::new(base.with(layer)))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald(_base: Filtered) -> Result<BoxedSubscriber, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}
