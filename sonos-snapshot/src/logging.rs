//! Logging setup for applications using sonos-snapshot
//!
//! The library only emits `tracing` events. Binaries pick how they are shown.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output at `info`
    Development,
    /// Verbose output with source locations at `debug`
    Debug,
}

impl LoggingMode {
    /// Parse a `SONOS_LOG_MODE` value; anything unrecognized is `Silent`
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => LoggingMode::Development,
            "debug" => LoggingMode::Debug,
            _ => LoggingMode::Silent,
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global subscriber for `mode`
///
/// Call once, early. The level comes from `SONOS_LOG_LEVEL`, then `RUST_LOG`,
/// then the mode's default.
///
/// ```rust,ignore
/// sonos_snapshot::logging::init_logging(LoggingMode::Development)?;
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .with(env_filter("info"))
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter("debug"))
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
    }
}

/// Initialize logging from `SONOS_LOG_MODE` (`silent`, `development`, `debug`)
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = std::env::var("SONOS_LOG_MODE")
        .map(|value| LoggingMode::from_env_value(&value))
        .unwrap_or(LoggingMode::Silent);
    init_logging(mode)
}

fn env_filter(default_level: &str) -> EnvFilter {
    std::env::var("SONOS_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Whether a global subscriber is already installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}
