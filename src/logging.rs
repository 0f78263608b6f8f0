//! Level-filtered diagnostic logger
//!
//! Wraps `env_logger` with a fixed line format:
//! `[HH:MM:SS] [LEVEL] message key=value...` written to stderr.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use log::kv::{Key, Value, VisitSource};
use log::LevelFilter;

use crate::error::TfeError;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    #[default]
    Off,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

impl FromStr for LogLevel {
    type Err = TfeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "" => Ok(LogLevel::Off),
            other => Err(TfeError::Validation(format!(
                "unknown log level '{}' (expected trace, debug, info, warn, error or off)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        write!(f, "{}", s)
    }
}

/// Logger settings captured at startup
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub level: LogLevel,
    /// Accepted for compatibility; records still go to stderr
    pub log_dir: Option<PathBuf>,
}

/// Collects `key=value` pairs attached to a log record
struct KvCollector<'a>(&'a mut String);

impl<'kvs> VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        let _ = write!(self.0, " {}={}", key, value);
        Ok(())
    }
}

/// Render the uncolored part after the level tag
fn format_body(record: &log::Record<'_>) -> String {
    let mut body = record.args().to_string();
    let _ = record.key_values().visit(&mut KvCollector(&mut body));
    body
}

/// Install the global logger
///
/// Safe to call more than once; later calls are ignored.
pub fn init(settings: &LogSettings) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(settings.level.as_filter())
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{}] [{style}{}{style:#}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                format_body(record)
            )
        });

    if builder.try_init().is_ok() {
        if let Some(dir) = &settings.log_dir {
            log::debug!("log directory configured: {}", dir.display());
        }
    }
}
