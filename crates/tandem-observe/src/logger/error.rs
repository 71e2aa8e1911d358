use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    InvalidFormat(String),
    #[error("journald output needs linux and the `journald` feature")]
    JournaldNotSupported,
    #[error("cannot open the journald socket: {0}")]
    Journald(#[source] std::io::Error),
    #[error("a global logger is already installed")]
    AlreadyInitialized(#[from] SetGlobalDefaultError),
    #[error("invalid log filter {level:?}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: ParseError,
    },
}
