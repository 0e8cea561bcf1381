//! # Adroit
//!
//! A convention-routed action-domain-responder framework.
//!
//! ## Overview
//!
//! Adroit maps a request path to a handler by naming convention alone: no
//! route table. `/blog/post/42` is tried as `Blog\Action\Post\42\IndexAction`,
//! then backtracks segment by segment until the component registry knows
//! the identifier, e.g. `Blog\Action\PostAction` with the parameter `42`.
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌────────────┐     ┌───────────┐
//! │ Application │────▶│ RouteResolver │────▶│ Dispatcher │────▶│  Action   │──▶ Responder
//! │ (bundles)   │     │ (backtracking)│     │ (EventBus) │     │           │
//! └─────────────┘     └───────────────┘     └────────────┘     └───────────┘
//! ```
//!
//! - **Bundles**: self-contained modules with a namespace prefix
//! - **Actions**: handle one request and return a response
//! - **Responders**: turn an action's payload into a response
//! - **EventBus**: `before_dispatch` / `after_dispatch` hooks with
//!   priorities and cancellation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adroit::prelude::*;
//!
//! #[derive(Default)]
//! struct ShowPost;
//!
//! impl Action for ShowPost {
//!     fn invoke(
//!         &mut self,
//!         ctx: &mut ActionContext<'_>,
//!         params: &[String],
//!     ) -> Result<Response, BoxError> {
//!         ctx.respond(&serde_json::json!({ "id": params.first() }))
//!     }
//! }
//!
//! #[distributed_slice(BUNDLES)]
//! #[linkme(crate = adroit::framework::linkme)]
//! static BLOG: BundleDescriptor = bundle! {
//!     name: "Blog",
//!     namespace: "Blog\\",
//!     actions: { "Post" => ShowPost::default },
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?;
//!     let app = Application::from_linked(&config)?;
//!     println!("{}", app.handle(&Request::cli("/blog/post/42")).body());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` *(default)*: TOML configuration files
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log lines

pub use adroit_core as core;
pub use adroit_framework as framework;
pub use adroit_runtime as runtime;

pub use adroit_framework::bundle;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use adroit::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use adroit_runtime::{AdroitConfig, Application, ConfigLoader, logging};

    // Bundles
    pub use adroit_framework::linkme::distributed_slice;
    pub use adroit_framework::{BUNDLES, BundleDescriptor, bundle};

    // Components
    pub use adroit_framework::{Action, ActionContext, JsonResponder, Responder};

    // Lifecycle events
    pub use adroit_framework::{AFTER_DISPATCH, AfterDispatch, BEFORE_DISPATCH, BeforeDispatch};

    // Values
    pub use adroit_core::{
        BoxError, DEFAULT_PRIORITY, Event, EventBus, MatchedRoute, Request, Response,
    };
}
