mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use log::{BoxedSubscriber, build_subscriber};

/// Install the logger described by `cfg` as the process-wide default.
/// Text and JSON records go to stderr. Fails if a global logger is already set.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let subscriber = build_subscriber(cfg, std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
