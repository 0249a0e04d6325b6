//! # Logging Utilities
//!
//! Installs the `tracing` subscriber that Tripwire diagnostics are written to.
//!
//! Failed checks are `tracing` events on target `tripwire`; trap dispatches
//! are `trace` events on `tripwire::trap`. Nothing is printed until a
//! subscriber is installed, so binaries call one of the `init_*` functions
//! early in `main`.
//!
//! Output goes to **stderr**, like any other diagnostic stream, and can be
//! mirrored to a daily rolling file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tripwire_utils::init_logging;
//!
//! // Initialize with default settings (reads from RUST_LOG env var)
//! let _guard = init_logging().expect("Failed to initialize logging");
//!
//! tracing::warn!(target: "tripwire", "src/main.rs:3 <app::main> Failed check `ready`");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=tripwire::trap=trace`)
//! - `TRIPWIRE_LOG_FORMAT`: Set output format (`pretty`, `compact` or `json`, default: `pretty`)
//! - `TRIPWIRE_LOG_FILE`: Optional path to log file (if not set, logs only to stderr)
//!
//! ## Examples
//!
//! ```rust,no_run
//! use tripwire_utils::{LogFormat, LogLevel, init_logging_with_level};
//!
//! // Show every trap dispatch, one line per event
//! let _guard = init_logging_with_level(LogLevel::Trace, LogFormat::Compact)
//!     .expect("Failed to initialize logging");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Environment variable selecting the output format
pub const FORMAT_ENV: &str = "TRIPWIRE_LOG_FORMAT";

/// Environment variable naming an optional log file
pub const FILE_ENV: &str = "TRIPWIRE_LOG_FILE";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Multi-field, human-readable format (default)
    Pretty,
    /// One short line per event, closest to a plain `file:line <routine> message` log
    Compact,
    /// JSON format, one object per event with all diagnostic fields
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "compact" | "short" | "line" => Ok(LogFormat::Compact),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Fatal diagnostics only
    Error,
    /// All failed checks (default for diagnostics)
    Warn,
    /// Info level, adds `diag_log!` lines
    Info,
    /// Debug level, adds probe fallbacks
    Debug,
    /// Trace level, adds every trap dispatch
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
        match s.trim().to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Keeps the background file writer alive
///
/// Dropping it flushes and stops file logging. Hold it for the life of
/// `main`. When no log file is configured it holds nothing.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging with default settings
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `tripwire::trap=trace`)
/// - `TRIPWIRE_LOG_FORMAT`: Output format (`pretty`, `compact` or `json`, default: `pretty`)
/// - `TRIPWIRE_LOG_FILE`: Optional path to log file
///
/// ## Example
///
/// ```rust,no_run
/// use tripwire_utils::init_logging;
///
/// let _guard = init_logging().expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
///
/// ## Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - `TRIPWIRE_LOG_FORMAT` holds an unknown format
/// - File logging fails (if `TRIPWIRE_LOG_FILE` is set)
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    let format = match env::var(FORMAT_ENV) {
        Ok(value) => value.parse()?,
        Err(_) => LogFormat::Pretty,
    };

    // Read log level from RUST_LOG when it is a bare level, else default to WARN
    let default_level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LogLevel>().ok())
        .map_or(Level::WARN, Level::from);

    init_logging_internal(format, default_level, false)
}

/// Initialize logging with explicit level and format
///
/// The explicit level wins over `RUST_LOG`. `TRIPWIRE_LOG_FILE` is still honored.
///
/// ## Example
///
/// ```rust,no_run
/// use tripwire_utils::{LogFormat, LogLevel, init_logging_with_level};
///
/// let _guard = init_logging_with_level(LogLevel::Debug, LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_logging_internal(format, level.into(), true)
}

/// Build the level filter
///
/// Priority:
/// 1. An explicit level (from a CLI flag)
/// 2. `RUST_LOG` (supports module-specific filters like `tripwire::trap=trace`)
/// 3. The default level
fn build_filter(level: Level, explicit: bool) -> EnvFilter
{
    if explicit {
        EnvFilter::new(level.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
    }
}

/// Split a log file path into the directory and file name `tracing-appender` wants
fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), LoggingError>
{
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InitializationFailed(format!("{} is not a file path", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&directory)?;
    Ok((directory, PathBuf::from(file_name)))
}

/// Internal initialization function
fn init_logging_internal(format: LogFormat, level: Level, explicit: bool) -> Result<LoggingGuard, LoggingError>
{
    // Check if file logging is requested
    let log_file = env::var(FILE_ENV).ok().map(PathBuf::from);

    let (file_writer, file_guard) = match log_file {
        Some(path) => {
            let (directory, file_name) = split_log_path(&path)?;
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer: BoxedLayer = match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_writer(io::stderr)
            .with_filter(build_filter(level, explicit))
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_ansi(false)
            .with_writer(io::stderr)
            .with_filter(build_filter(level, explicit))
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .with_filter(build_filter(level, explicit))
            .boxed(),
    };

    let mut layers = vec![console_layer];

    // Files always get the full record, without colors
    if let Some(writer) = file_writer {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false);
        layers.push(match format {
            LogFormat::Json => layer.json().with_filter(build_filter(level, explicit)).boxed(),
            LogFormat::Pretty | LogFormat::Compact => layer.with_filter(build_filter(level, explicit)).boxed(),
        });
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(started = %Utc::now().to_rfc3339(), format = ?format, file_logging = file_guard.is_some(), "logging initialized");

    Ok(LoggingGuard { _file: file_guard })
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Unknown log format: {0}. Use 'pretty', 'compact' or 'json'")]
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
