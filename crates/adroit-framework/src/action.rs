//! Actions and responders.
//!
//! An [`Action`] is the handler a route resolves to. It receives the
//! positional parameters extracted from the path and returns a
//! [`Response`]. A [`Responder`] turns the data an action produced into a
//! response; it is found by the route's presenter identifier.
//!
//! Both traits have blanket implementations for closures, so small
//! handlers do not need a dedicated type:
//!
//! ```rust
//! use adroit_core::{BoxError, Response};
//! use adroit_framework::{Action, ActionContext};
//!
//! let mut greet = |_ctx: &mut ActionContext<'_>, params: &[String]| -> Result<Response, BoxError> {
//!     let name = params.first().map_or("world", String::as_str);
//!     Ok(Response::text(format!("hello, {name}")))
//! };
//! # let _ = &mut greet as &mut dyn Action;
//! ```

use adroit_core::{BoxError, MatchedRoute, Request, Response};
use serde_json::Value;

use crate::context::ActionContext;

// ============================================================================
// Action
// ============================================================================

/// A request handler.
///
/// A fresh instance is built from the component registry for every
/// dispatch, so implementations may keep per-request state in `self`.
pub trait Action: Send {
    /// Handles the request.
    ///
    /// `params` are the path segments left after the handler identifier,
    /// in path order.
    fn invoke(
        &mut self,
        ctx: &mut ActionContext<'_>,
        params: &[String],
    ) -> Result<Response, BoxError>;
}

impl<F> Action for F
where
    F: FnMut(&mut ActionContext<'_>, &[String]) -> Result<Response, BoxError> + Send,
{
    fn invoke(
        &mut self,
        ctx: &mut ActionContext<'_>,
        params: &[String],
    ) -> Result<Response, BoxError> {
        self(ctx, params)
    }
}

impl std::fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Action")
    }
}

// ============================================================================
// Responder
// ============================================================================

/// Builds a response from the data an action produced.
pub trait Responder: Send + Sync {
    /// Renders `payload` for the given request.
    fn respond(
        &self,
        request: &Request,
        route: &MatchedRoute,
        payload: Value,
    ) -> Result<Response, BoxError>;
}

impl<F> Responder for F
where
    F: Fn(&Request, &MatchedRoute, Value) -> Result<Response, BoxError> + Send + Sync,
{
    fn respond(
        &self,
        request: &Request,
        route: &MatchedRoute,
        payload: Value,
    ) -> Result<Response, BoxError> {
        self(request, route, payload)
    }
}

/// Renders the payload as a JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponder;

impl Responder for JsonResponder {
    fn respond(
        &self,
        _request: &Request,
        _route: &MatchedRoute,
        payload: Value,
    ) -> Result<Response, BoxError> {
        Ok(Response::json(&payload))
    }
}
