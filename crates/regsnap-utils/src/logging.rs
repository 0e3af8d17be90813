//! # Logging Utilities
//!
//! Logging infrastructure for regsnap using `tracing`.
//!
//! Console output goes to stderr so that command output on stdout stays
//! machine-readable. Optionally a second, ANSI-free layer writes to a daily
//! rolling file.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Filter directives (e.g., `RUST_LOG=debug`, `RUST_LOG=regsnap_core=trace`)
//! - `REGSNAP_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
//! - `REGSNAP_LOG_FILE`: Optional path to a log file
//!
//! ## Example
//!
//! ```rust,no_run
//! use regsnap_utils::{LogFormat, LogLevel, init_logging_with_level};
//!
//! init_logging_with_level(LogLevel::Debug, LogFormat::Pretty).expect("Failed to initialize logging");
//! tracing::debug!("decoding dump");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const FORMAT_VAR: &str = "REGSNAP_LOG_FORMAT";
const FILE_VAR: &str = "REGSNAP_LOG_FILE";

/// Keeps the file writer's worker alive for the life of the process.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON lines
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    Error,
    Warn,
    /// Default
    Info,
    Debug,
    /// Most verbose; includes every register write
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Initialize logging from the environment
///
/// `RUST_LOG` supplies the filter (default `info`), `REGSNAP_LOG_FORMAT`
/// the format and `REGSNAP_LOG_FILE` an optional file.
///
/// ## Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - `REGSNAP_LOG_FORMAT` is set to an unknown format
/// - The directory for `REGSNAP_LOG_FILE` cannot be created
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = log_format_from_env()?;
    let directives = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| Level::INFO.to_string());
    init(format, &directives, log_file_from_env())
}

/// Initialize logging with an explicit level, ignoring `RUST_LOG`
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the log file
/// directory cannot be created.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init(format, &Level::from(level).to_string(), log_file_from_env())
}

/// Output format named by `REGSNAP_LOG_FORMAT`, `Pretty` when unset
///
/// ## Errors
///
/// `LoggingError::InvalidFormat` if the variable names an unknown format.
pub fn log_format_from_env() -> Result<LogFormat, LoggingError>
{
    format_from(env::var(FORMAT_VAR).ok())
}

fn format_from(value: Option<String>) -> Result<LogFormat, LoggingError>
{
    value.map_or(Ok(LogFormat::Pretty), |value| value.parse())
}

fn log_file_from_env() -> Option<PathBuf>
{
    env::var_os(FILE_VAR).filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn filter(directives: &str) -> EnvFilter
{
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

fn console_layer(format: LogFormat, directives: &str) -> BoxedLayer
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter(directives)).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter(directives))
            .boxed(),
    }
}

fn file_layer(format: LogFormat, directives: &str, path: &Path) -> Result<(BoxedLayer, WorkerGuard), LoggingError>
{
    let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
    std::fs::create_dir_all(directory)?;
    let appender = tracing_appender::rolling::daily(directory, path.file_name().unwrap_or_default());
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false);

    let layer = match format {
        LogFormat::Pretty => layer.with_filter(filter(directives)).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter(directives))
            .boxed(),
    };
    Ok((layer, guard))
}

fn init(format: LogFormat, directives: &str, log_file: Option<PathBuf>) -> Result<(), LoggingError>
{
    let mut layers = vec![console_layer(format, directives)];
    let mut guard = None;
    if let Some(path) = &log_file {
        let (layer, worker) = file_layer(format, directives, path)?;
        layers.push(layer);
        guard = Some(worker);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    if let Some(worker) = guard {
        // try_init succeeded, so this is the first and only guard
        let _ = FILE_GUARD.set(worker);
    }

    tracing::debug!(?format, directives, file = ?log_file, "logging initialized");
    Ok(())
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Unknown log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Unknown log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("dev").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("prod").unwrap(), LogFormat::Json);
        assert!(matches!(LogFormat::from_str("xml"), Err(LoggingError::InvalidFormat(_))));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(matches!(LogLevel::from_str("loud"), Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn test_format_from_env_value()
    {
        assert_eq!(format_from(None).unwrap(), LogFormat::Pretty);
        assert_eq!(format_from(Some("json".to_string())).unwrap(), LogFormat::Json);
        assert!(matches!(
            format_from(Some("xml".to_string())),
            Err(LoggingError::InvalidFormat(value)) if value == "xml"
        ));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }
}
