//! # Adroit Core
//!
//! The routing and event engine of the Adroit action-domain-responder
//! framework.
//!
//! ## Layers
//!
//! ### Foundation
//!
//! Value types every layer passes around:
//! - [`Request`] and [`Response`]
//! - String inflection ([`inflector`]) that turns URL segments into
//!   identifier segments
//!
//! ### Routing
//!
//! Convention-based resolution of a path to a handler identifier:
//! - [`RouteResolver`] walks candidate identifiers with a three-phase
//!   backtracking search ([`RoutingPhase`], [`Candidate`])
//! - [`Bundles`] is the registry of loaded bundles and their namespaces
//! - [`Resolution`] and [`MatchedRoute`] describe the outcome
//!
//! ### Events
//!
//! [`EventBus`] is a priority-ordered, cancelable publish/subscribe queue
//! used as the extension point around dispatch.
//!
//! ## Resolution at a glance
//!
//! ```text
//! GET /blog/post/42
//!   │
//!   ▼
//! ┌──────────────┐  candidate ids   ┌────────────────┐
//! │ RouteResolver │ ───────────────▶ │ exists oracle  │
//! └──────────────┘ ◀─────────────── └────────────────┘
//!   │                 first hit
//!   ▼
//! MatchedRoute { Blog\Action\PostAction, token "post", params [42] }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use adroit_core::{Bundles, LanguageConfig, RouteResolver};
//!
//! let bundles = Bundles::new().with("App", "App\\").unwrap();
//! let resolver = RouteResolver::new(LanguageConfig::default());
//!
//! let resolution = resolver.resolve("/foo/a/b", "GET", &bundles, |id| {
//!     id == "App\\Action\\FooAction"
//! });
//!
//! assert_eq!(resolution.action_token(), Some("foo"));
//! assert_eq!(resolution.params(), &["a", "b"]);
//! ```

pub mod bundle;
pub mod error;
pub mod event;
pub mod foundation;
pub mod inflector;
pub mod routing;

// Re-export foundation types
pub use foundation::{CLI_METHOD, Request, Response};

// Re-export routing types
pub use bundle::{APP_BUNDLE, Bundle, BundleRegistry, Bundles, NAMESPACE_SEPARATOR};
pub use routing::{
    Candidate, LanguageConfig, MatchedRoute, Resolution, RouteResolver, RoutingPhase,
};

// Re-export event types
pub use event::{DEFAULT_PRIORITY, Event, EventBus, ListenerId};

pub use error::{BoxError, BundleError, BundleResult, EventError, EventResult};

/// Prelude for common imports.
pub mod prelude {
    pub use super::bundle::{BundleRegistry, Bundles};
    pub use super::error::{BoxError, EventError};
    pub use super::event::{DEFAULT_PRIORITY, Event, EventBus};
    pub use super::foundation::*;
    pub use super::routing::{LanguageConfig, MatchedRoute, Resolution, RouteResolver};
}
