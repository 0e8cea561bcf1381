//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use adroit_core::{APP_BUNDLE, LanguageConfig};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdroitConfig {
    /// Languages recognised as a leading path segment.
    #[serde(default)]
    pub languages: LanguagesConfig,

    /// Bundles to load, in load order.
    #[serde(default = "default_bundles")]
    pub bundles: Vec<BundleConfig>,

    /// Append the `App` bundle when it is available but not listed.
    #[serde(default = "default_true")]
    pub app_fallback: bool,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AdroitConfig {
    fn default() -> Self {
        Self {
            languages: LanguagesConfig::default(),
            bundles: default_bundles(),
            app_fallback: true,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_bundles() -> Vec<BundleConfig> {
    vec![BundleConfig::new(APP_BUNDLE, "App\\")]
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Languages
// =============================================================================

/// Language settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Language tags accepted as the first path segment.
    #[serde(default = "default_possible_languages")]
    pub possible: Vec<String>,

    /// Language used when the path carries none.
    #[serde(default = "default_language")]
    pub default: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            possible: default_possible_languages(),
            default: default_language(),
        }
    }
}

fn default_possible_languages() -> Vec<String> {
    vec![default_language()]
}

fn default_language() -> String {
    "en".to_string()
}

impl From<&LanguagesConfig> for LanguageConfig {
    fn from(config: &LanguagesConfig) -> Self {
        LanguageConfig::new(config.possible.iter().cloned(), config.default.clone())
    }
}

// =============================================================================
// Bundles
// =============================================================================

/// One bundle entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Camelized bundle name.
    pub name: String,

    /// Namespace prefix; the bundle's own default when absent.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Whether the bundle is loaded.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl BundleConfig {
    /// Creates an enabled entry with an explicit namespace.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            enabled: true,
        }
    }

    /// Creates an enabled entry that uses the bundle's default namespace.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            enabled: true,
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very verbose, every backtracking step.
    Trace,
    /// Matches, listener registration, bundle loading.
    Debug,
    /// Startup summary.
    #[default]
    Info,
    /// Configuration fallbacks.
    Warn,
    /// Failed dispatches.
    Error,
}

impl LogLevel {
    /// Returns the level name as used in filter directives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single line, abbreviated.
    #[default]
    Compact,
    /// Single line with all fields.
    Full,
    /// Multi-line, human oriented.
    Pretty,
    /// Newline-delimited JSON (requires the `json-log` feature).
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// A file, see [`LoggingConfig::file_path`].
    File,
}

/// How often the log file is rotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// A single file that is never rotated.
    #[default]
    Never,
    /// A new file every hour.
    Hourly,
    /// A new file every day.
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    /// Span creation.
    #[serde(default)]
    pub new: bool,
    /// Span entry.
    #[serde(default)]
    pub enter: bool,
    /// Span exit.
    #[serde(default)]
    pub exit: bool,
    /// Span close.
    #[serde(default)]
    pub close: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level; `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub level: LogLevel,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,

    /// Destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Span lifecycle events.
    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread ids.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line.
    #[serde(default)]
    pub file_location: bool,

    /// Log file, required when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Rotation of the log file.
    #[serde(default)]
    pub rotation: LogRotation,

    /// Number of rotated files kept; `0` keeps all.
    #[serde(default = "default_max_files")]
    pub max_files: u32,

    /// Per-module levels, e.g. `adroit_core = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
            file_path: None,
            rotation: LogRotation::default(),
            max_files: default_max_files(),
            filters: HashMap::new(),
        }
    }
}

fn default_max_files() -> u32 {
    5
}
