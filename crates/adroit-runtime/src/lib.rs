//! Adroit Runtime - bootstrap layer for the Adroit framework.
//!
//! This crate provides:
//! - Layered configuration ([`config`]) built on figment
//! - Logging setup ([`logging`]) built on tracing-subscriber
//! - The [`Application`] front controller, which loads the configured
//!   bundles, registers their components and turns requests into responses
//!
//! ```rust,ignore
//! use adroit_runtime::{Application, config::load_config, logging};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let app = Application::from_linked(&config)?;
//!     let response = app.handle(&Request::cli("/blog/post/42"));
//!     println!("{}", response.body());
//!     Ok(())
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: TOML configuration files
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log lines

pub mod application;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use application::Application;
pub use config::{AdroitConfig, BundleConfig, ConfigError, ConfigLoader, ConfigResult};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by bundle crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros for bundle crates.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
