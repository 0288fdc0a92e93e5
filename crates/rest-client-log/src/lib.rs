//! Logging setup for rest-client.
//!
//! Library crates only emit `tracing` events. Binaries and test harnesses
//! call [`init`] once to install a subscriber.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter, TestWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Environment variables read by [`LogConfig::from_env`].
pub mod vars {
    pub const REST_CLIENT_LOG_LEVEL: &str = "REST_CLIENT_LOG_LEVEL";
    pub const REST_CLIENT_LOG_FORMAT: &str = "REST_CLIENT_LOG_FORMAT";
    pub const REST_CLIENT_LOG_FILE: &str = "REST_CLIENT_LOG_FILE";
    pub const REST_CLIENT_LOG_SOURCE: &str = "REST_CLIENT_LOG_SOURCE";
    pub const REST_CLIENT_LOG_SPANS: &str = "REST_CLIENT_LOG_SPANS";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Raw `RUST_LOG`-style directives, used instead of `level` when set.
    pub directives: Option<String>,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Include span events.
    pub span_events: bool,
    /// Write through the test harness capture instead of stderr.
    pub test_writer: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    /// Parse from string. Unknown values fall back to pretty.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            directives: None,
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            span_events: false,
            test_writer: false,
        }
    }
}

fn flag(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(vars::REST_CLIENT_LOG_LEVEL) {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        } else if let Some(directives) = lookup(vars::RUST_LOG) {
            if let Some(l) = LogLevel::parse(&directives) {
                config.level = l;
            }
            config.directives = Some(directives);
        }

        if let Some(format) = lookup(vars::REST_CLIENT_LOG_FORMAT) {
            config.format = LogFormat::parse(&format);
        }

        if let Some(file_path) = lookup(vars::REST_CLIENT_LOG_FILE) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Some(source_location) = lookup(vars::REST_CLIENT_LOG_SOURCE) {
            config.source_location = flag(&source_location);
        }

        if let Some(span_events) = lookup(vars::REST_CLIENT_LOG_SPANS) {
            config.span_events = flag(&span_events);
        }

        config
    }

    /// Config used by test harnesses: debug level, captured output.
    pub fn for_tests() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Compact,
            source_location: true,
            test_writer: true,
            ..Self::default()
        }
    }

    /// The filter `init` installs: `directives` when set and valid,
    /// otherwise `level`.
    pub fn env_filter(&self) -> EnvFilter {
        self.directives
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(self.level.as_directive()))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn fmt_layer<S, W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(config.span_events());

    match config.format {
        LogFormat::Pretty => Box::new(layer),
        LogFormat::Compact => Box::new(layer.compact()),
        LogFormat::Json => Box::new(layer.json()),
    }
}

/// Initialize logging with the given configuration.
///
/// The process environment is not consulted here; build the config with
/// [`LogConfig::from_env`] to honor `RUST_LOG`.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = config.env_filter();

    let console = if config.test_writer {
        fmt_layer(&config, TestWriter::new(), false)
    } else {
        fmt_layer(&config, io::stderr, true)
    };

    let file = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(fmt_layer(&config, Mutex::new(file), false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_log_level_from() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.source_location);
        assert!(!config.span_events);
        assert!(!config.test_writer);
        assert!(config.directives.is_none());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = LogConfig::from_lookup(lookup(&[
            (vars::REST_CLIENT_LOG_LEVEL, "debug"),
            (vars::REST_CLIENT_LOG_FORMAT, "json"),
            (vars::REST_CLIENT_LOG_FILE, "/tmp/rest-client.log"),
            (vars::REST_CLIENT_LOG_SOURCE, "true"),
            (vars::REST_CLIENT_LOG_SPANS, "1"),
        ]));

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/rest-client.log")));
        assert!(config.source_location);
        assert!(config.span_events);
    }

    #[test]
    fn test_rust_log_fallback() {
        let config = LogConfig::from_lookup(lookup(&[(vars::RUST_LOG, "warn")]));
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.directives.as_deref(), Some("warn"));

        let config = LogConfig::from_lookup(lookup(&[
            (vars::RUST_LOG, "warn"),
            (vars::REST_CLIENT_LOG_LEVEL, "error"),
        ]));
        assert_eq!(config.level, LogLevel::Error);
        assert!(config.directives.is_none());
    }

    #[test]
    fn test_explicit_level_wins_over_rust_log_in_filter() {
        use tracing_subscriber::filter::LevelFilter;

        let config = LogConfig::from_lookup(lookup(&[
            (vars::RUST_LOG, "rest_client_http=trace"),
            (vars::REST_CLIENT_LOG_LEVEL, "error"),
        ]));
        assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::ERROR));

        let config = LogConfig::from_lookup(lookup(&[(vars::RUST_LOG, "rest_client_http=trace")]));
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_invalid_directives_fall_back_to_level() {
        use tracing_subscriber::filter::LevelFilter;

        let config = LogConfig {
            level: LogLevel::Warn,
            directives: Some("rest_client_http=loud".to_string()),
            ..LogConfig::default()
        };
        assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_init_twice_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file_path: Some(dir.path().join("test.log")),
            ..LogConfig::for_tests()
        };

        // Another test in this binary may have installed a subscriber first.
        let _ = init(config.clone());
        assert!(matches!(init(config), Err(LogError::InitError(_))));
        assert!(dir.path().join("test.log").exists());
    }
}
