//! Logging setup.
//!
//! A single `tracing-subscriber` registry with an [`EnvFilter`] and one fmt
//! layer. `RUST_LOG`, when set, replaces the configured base level; the
//! per-module filters of [`LoggingConfig`] are always added on top.
//!
//! ```rust,ignore
//! use adroit_runtime::config::load_config;
//! use adroit_runtime::logging;
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! Manual setup, e.g. to watch the router backtrack:
//!
//! ```rust,ignore
//! use adroit_runtime::logging::{LoggingBuilder, SpanEvents};
//!
//! LoggingBuilder::new()
//!     .directive("adroit_core::routing=trace")
//!     .span_events(SpanEvents::LIFECYCLE)
//!     .init();
//! ```

use std::path::PathBuf;

use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};

/// Span lifecycle events written by the fmt layer.
///
/// The router opens a `resolve` span per request and the dispatcher a
/// `dispatch` span per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    /// Span creation.
    pub new: bool,
    /// Span entry.
    pub enter: bool,
    /// Span exit.
    pub exit: bool,
    /// Span close, with timing.
    pub close: bool,
}

impl SpanEvents {
    /// No span events.
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Creation and close only.
    pub const LIFECYCLE: Self = Self {
        new: true,
        enter: false,
        exit: false,
        close: true,
    };

    /// Every span event.
    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };

    fn to_fmt_span(self) -> fmt::format::FmtSpan {
        let mut span = fmt::format::FmtSpan::NONE;
        if self.new {
            span |= fmt::format::FmtSpan::NEW;
        }
        if self.enter {
            span |= fmt::format::FmtSpan::ENTER;
        }
        if self.exit {
            span |= fmt::format::FmtSpan::EXIT;
        }
        if self.close {
            span |= fmt::format::FmtSpan::CLOSE;
        }
        span
    }
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

/// Initializes logging from configuration.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

// =============================================================================
// LoggingBuilder
// =============================================================================

/// Builder for the global subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: tracing::Level,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    with_target: bool,
    with_thread_ids: bool,
    with_file: bool,
    with_line_number: bool,
    file_path: Option<PathBuf>,
    rotation: LogRotation,
    max_files: usize,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Creates a builder logging compact lines at INFO to stdout.
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            level: tracing::Level::INFO,
            span_events: SpanEvents::NONE,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            with_target: true,
            with_thread_ids: false,
            with_file: false,
            with_line_number: false,
            file_path: None,
            rotation: LogRotation::Never,
            max_files: 5,
        }
    }

    /// Creates a builder from configuration.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut directives: Vec<String> = config
            .filters
            .iter()
            .map(|(target, level)| format!("{target}={level}"))
            .collect();
        // HashMap order is unstable; keep the directive list deterministic.
        directives.sort();

        Self {
            directives,
            level: config.level.to_tracing_level(),
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            with_target: true,
            with_thread_ids: config.thread_ids,
            with_file: config.file_location,
            with_line_number: config.file_location,
            file_path: config.file_path.clone(),
            rotation: config.rotation,
            max_files: config.max_files as usize,
        }
    }

    /// Sets the base level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive such as `adroit_core=trace`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Selects the span events to log.
    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    /// Sets the line format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the destination.
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Includes the target in each line.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Includes thread ids in each line.
    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    /// Includes the source file and line in each line.
    pub fn with_file_location(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self.with_line_number = enabled;
        self
    }

    /// Sets the log file, used when the output is [`LogOutput::File`].
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Sets the log file rotation.
    pub fn rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets how many rotated files are kept; `0` keeps all.
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base = self.level.as_str().to_lowercase();
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    fn build_file_appender(&self) -> Result<RollingFileAppender, String> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| "no file path configured".to_string())?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let prefix = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("adroit");

        let rotation = match self.rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        };

        let mut builder = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(prefix);
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            builder = builder.filename_suffix(ext);
        }
        if self.max_files > 0 {
            builder = builder.max_log_files(self.max_files);
        }

        builder.build(dir).map_err(|e| e.to_string())
    }

    /// Installs the subscriber; a no-op if one is already installed.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Installs the subscriber.
    ///
    /// Fallbacks (missing log file, JSON without the `json-log` feature)
    /// are reported with `warn!` once the subscriber is live.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();
        let span_events = self.span_events.to_fmt_span();
        let mut fallbacks: Vec<String> = Vec::new();

        #[cfg(not(feature = "json-log"))]
        let format = if self.format == LogFormat::Json {
            fallbacks.push("JSON logging requires the 'json-log' feature, using compact".into());
            LogFormat::Compact
        } else {
            self.format
        };
        #[cfg(feature = "json-log")]
        let format = self.format;

        macro_rules! configure_layer {
            ($layer:expr) => {
                $layer
                    .with_span_events(span_events.clone())
                    .with_target(self.with_target)
                    .with_thread_ids(self.with_thread_ids)
                    .with_file(self.with_file)
                    .with_line_number(self.with_line_number)
            };
        }

        macro_rules! init_with_writer {
            ($writer:expr) => {
                match format {
                    #[cfg(feature = "json-log")]
                    LogFormat::Json => tracing_subscriber::registry()
                        .with(configure_layer!(fmt::layer().json().with_writer($writer)))
                        .with(filter)
                        .try_init(),
                    #[cfg(not(feature = "json-log"))]
                    LogFormat::Json | LogFormat::Compact => tracing_subscriber::registry()
                        .with(configure_layer!(fmt::layer().compact().with_writer($writer)))
                        .with(filter)
                        .try_init(),
                    #[cfg(feature = "json-log")]
                    LogFormat::Compact => tracing_subscriber::registry()
                        .with(configure_layer!(fmt::layer().compact().with_writer($writer)))
                        .with(filter)
                        .try_init(),
                    LogFormat::Full => tracing_subscriber::registry()
                        .with(configure_layer!(fmt::layer().with_writer($writer)))
                        .with(filter)
                        .try_init(),
                    LogFormat::Pretty => tracing_subscriber::registry()
                        .with(configure_layer!(fmt::layer().pretty().with_writer($writer)))
                        .with(filter)
                        .try_init(),
                }
            };
        }

        let result = match self.output {
            LogOutput::Stdout => init_with_writer!(std::io::stdout),
            LogOutput::Stderr => init_with_writer!(std::io::stderr),
            LogOutput::File => match self.build_file_appender() {
                Ok(appender) => init_with_writer!(appender),
                Err(reason) => {
                    fallbacks.push(format!("Cannot open log file ({reason}), using stdout"));
                    init_with_writer!(std::io::stdout)
                }
            },
        };

        if result.is_ok() {
            for message in &fallbacks {
                warn!("{message}");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LogLevel;

    use super::*;

    #[test]
    fn test_span_events_to_fmt_span() {
        assert_eq!(SpanEvents::NONE.to_fmt_span(), fmt::format::FmtSpan::NONE);
        assert_eq!(SpanEvents::FULL.to_fmt_span(), fmt::format::FmtSpan::FULL);
        assert_eq!(
            SpanEvents::LIFECYCLE.to_fmt_span(),
            fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE
        );
    }

    #[test]
    fn test_span_events_from_config() {
        let config = SpanEventConfig {
            close: true,
            ..Default::default()
        };
        let events = SpanEvents::from(&config);
        assert!(events.close);
        assert!(!events.new);
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggingConfig::default();
        config.level = LogLevel::Debug;
        config.thread_ids = true;
        config.file_location = true;
        config.max_files = 3;
        config.filters.insert("adroit_framework".into(), LogLevel::Warn);
        config.filters.insert("adroit_core".into(), LogLevel::Trace);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, tracing::Level::DEBUG);
        assert_eq!(
            builder.directives,
            vec!["adroit_core=trace", "adroit_framework=warn"]
        );
        assert!(builder.with_thread_ids);
        assert!(builder.with_file && builder.with_line_number);
        assert_eq!(builder.max_files, 3);
    }

    #[test]
    fn test_file_appender_requires_path() {
        let builder = LoggingBuilder::new().output(LogOutput::File);
        assert!(builder.build_file_appender().is_err());
    }
}
