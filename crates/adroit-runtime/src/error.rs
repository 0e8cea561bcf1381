//! Runtime error types.

use adroit_core::BundleError;
use adroit_framework::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while bootstrapping an application.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bundle could not be loaded.
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// A bundle registered a component twice.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A configured bundle has no descriptor.
    #[error("Bundle not found: {0}")]
    UnknownBundle(String),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
