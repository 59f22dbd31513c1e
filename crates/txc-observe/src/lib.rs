//! Logging setup shared by the console binaries.
mod clock;
mod config;
mod error;
mod format;
mod level;

pub use clock::{LoggerClock, LoggerTimeZone, init_local_offset};
pub use config::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Text and JSON output go to stderr so that stdout stays free for command
/// output. Call [`init_local_offset`] first when `cfg.tz` is `Local`.
///
/// ```rust
/// use txc_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::warn!("visible at the default level");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    let filter = cfg.level.to_env_filter();
    let clock = LoggerClock::new(cfg.tz);

    match cfg.format {
        LoggerFormat::Text => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(cfg.should_use_color())
                .with_target(cfg.with_targets)
                .with_timer(clock);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
        LoggerFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(clock);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
        LoggerFormat::Journald => journald(filter),
    }
}

#[cfg(target_os = "linux")]
fn journald(filter: tracing_subscriber::EnvFilter) -> LoggerResult<()> {
    let layer =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;
    install(tracing_subscriber::registry().with(filter).with(layer))
}

#[cfg(not(target_os = "linux"))]
fn journald(_filter: tracing_subscriber::EnvFilter) -> LoggerResult<()> {
    Err(LoggerError::JournaldNotSupported)
}

fn install<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
