//! Unified error types for the Adroit core.
//!
//! Framework-level errors (dispatch, component registry) are defined in
//! adroit-framework.

use thiserror::Error;

/// Boxed error type used for listener and handler failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors that can occur while dispatching an event.
#[derive(Debug, Error)]
pub enum EventError {
    /// An operation was attempted that the event does not allow.
    #[error("illegal operation on event '{event}': {reason}")]
    IllegalOperation {
        /// The event type the operation was attempted on.
        event: String,
        /// Why the operation is rejected.
        reason: &'static str,
    },

    /// A listener failed; the remaining listeners were not invoked.
    #[error("listener failed on event '{event}': {source}")]
    Listener {
        /// The event type being dispatched.
        event: String,
        /// The underlying listener error.
        #[source]
        source: BoxError,
    },
}

impl EventError {
    /// Creates an illegal-operation error for the given event type.
    pub fn illegal(event: impl Into<String>, reason: &'static str) -> Self {
        Self::IllegalOperation {
            event: event.into(),
            reason,
        }
    }

    /// Returns `true` if this is an illegal-operation error.
    pub fn is_illegal_operation(&self) -> bool {
        matches!(self, Self::IllegalOperation { .. })
    }
}

// =============================================================================
// Bundle Errors
// =============================================================================

/// Errors that can occur while building the bundle registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// A bundle with this name is already loaded.
    #[error("bundle '{0}' is already loaded")]
    Duplicate(String),

    /// The bundle name is not a camelized identifier.
    #[error("invalid bundle name '{name}': {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why the name is rejected.
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;

/// Result type for bundle registry operations.
pub type BundleResult<T> = Result<T, BundleError>;
