//! Logging infrastructure for model building and rendering
//!
//! The library emits `tracing` spans and events; binaries decide where they go by
//! calling [`init_logging`] once at startup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pumlgen::core::logging::init_logging;
//!
//! // Level and format from the environment, or info/compact
//! init_logging(None, None).ok();
//!
//! // Explicit settings
//! init_logging(Some("debug"), Some("pretty")).ok();
//! ```
//!
//! # Environment Variables
//!
//! - `PUMLGEN_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `PUMLGEN_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard `tracing-subscriber` filter, consulted after `PUMLGEN_LOG_LEVEL`
//!
//! # Filtering
//!
//! ```bash
//! # Only deduplication and generic reconciliation decisions
//! RUST_LOG="pumlgen::uml=debug" pumlgen render --input feed.json
//!
//! # Everything at info, per-node emission of the diagram at trace
//! RUST_LOG="info,pumlgen::uml::diagram=trace" pumlgen render --input feed.json
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the filter directive from the argument, the environment, or `info`
fn resolve_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var("PUMLGEN_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    if directive == "off" {
        return EnvFilter::new("off");
    }
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber
///
/// # Arguments
///
/// * `level` - Optional level or filter directive. Falls back to `PUMLGEN_LOG_LEVEL`,
///   then `RUST_LOG`, then `info`. Unparseable directives fall back to `info`.
/// * `format` - Optional format (compact|pretty|json). Falls back to
///   `PUMLGEN_LOG_FORMAT`, then `compact`.
///
/// # Errors
///
/// Returns an error for an unknown format, or when a global subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = resolve_filter(level);

    let format = match format
        .map(str::to_string)
        .or_else(|| std::env::var("PUMLGEN_LOG_FORMAT").ok())
    {
        Some(name) => {
            LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e))?
        }
        None => LogFormat::default(),
    };

    // Diagram text goes to stdout, so logs always go to stderr
    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
