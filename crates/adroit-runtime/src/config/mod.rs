//! Configuration for the Adroit runtime.
//!
//! Settings are layered with figment (defaults, files, `ADROIT_*`
//! environment) and checked by [`validate_config`] before bootstrap.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    AdroitConfig, BundleConfig, LanguagesConfig, LogFormat, LogLevel, LogOutput, LogRotation,
    LoggingConfig, SpanEventConfig,
};
pub use validation::validate_config;
