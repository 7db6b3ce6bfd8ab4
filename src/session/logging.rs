//! Logging and tracing setup
//!
//! Builds the global `tracing` subscriber for the layout tool and exposes the
//! structured-event macros used by the editing session.

use std::io;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Default log file prefix
pub const DEFAULT_LOG_FILE_PREFIX: &str = "room-inventory";

type InitResult = Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>>;

/// Keeps non-blocking writers flushing; hold it until the program exits
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops buffered log output"]
pub struct LoggingGuard {
    guards: Vec<WorkerGuard>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the crate
    pub level: Level,
    /// Emit JSON lines on the console
    pub json_format: bool,
    /// Also write to a daily rolling file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Emit span open/close events
    pub enable_span_events: bool,
    /// ANSI colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter, overrides `level`
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither `env_filter` nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// Console output goes to stderr so stdout stays free for JSON the tool
    /// prints. The file layer, when enabled, always writes JSON.
    pub fn init(self) -> InitResult {
        let filter = self.build_filter()?;
        let mut guard = LoggingGuard::default();

        let (console_writer, console_guard) = non_blocking(io::stderr());
        guard.guards.push(console_guard);

        let console_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_writer(console_writer)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            fmt::layer()
                .with_writer(console_writer)
                .with_ansi(self.enable_ansi)
                .with_target(false)
                .with_span_events(self.span_events())
                .boxed()
        };

        let file_layer = if self.log_to_file {
            let log_dir = self.log_directory.as_deref().unwrap_or("logs");
            let (file_writer, file_guard) =
                non_blocking(rolling::daily(log_dir, &self.log_file_prefix));
            guard.guards.push(file_guard);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_span_events(self.span_events())
                    .boxed(),
            )
        } else {
            None
        };

        Registry::default()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        info!(level = %self.level, file = self.log_to_file, "Logging initialized");
        Ok(guard)
    }

    /// Initialize info-level logging with span events
    pub fn init_verbose() -> InitResult {
        Self::new().with_level(Level::INFO).with_span_events().init()
    }

    /// Initialize debug-level logging with span events
    pub fn init_debug() -> InitResult {
        Self::new().with_level(Level::DEBUG).with_span_events().init()
    }

    /// Initialize warn-level logging without colors
    pub fn init_quiet() -> InitResult {
        Self::new().with_level(Level::WARN).without_ansi().init()
    }
}

/// Structured log event tagged with the inventory component
#[macro_export]
macro_rules! inventory_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "inventory",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "inventory",
        );
    };
}

/// Span wrapping a single editing operation
#[macro_export]
macro_rules! edit_span {
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info_span!(
            $name,
            component = "editor",
            $($key = $value,)*
        )
    };
    ($name:expr) => {
        tracing::info_span!(
            $name,
            component = "editor",
        )
    };
}
