//! Error types for the Adroit framework.

use adroit_core::{BoxError, EventError};
use thiserror::Error;

/// Errors that can occur while dispatching a matched route.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request did not resolve to a handler.
    #[error("no route matched the request")]
    RouteNotFound,

    /// The handler identifier does not name an action.
    #[error("component '{id}' is not an action")]
    InvalidActionType {
        /// The handler identifier.
        id: String,
    },

    /// A lifecycle listener failed.
    #[error(transparent)]
    Event(#[from] EventError),

    /// The action returned an error.
    #[error("action failed: {0}")]
    Handler(#[source] BoxError),
}

impl DispatchError {
    /// Returns `true` if no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound)
    }
}

/// Errors that can occur while filling the component registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A component is already registered under this identifier.
    #[error("component '{0}' is already registered")]
    Duplicate(String),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
