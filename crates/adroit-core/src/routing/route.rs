//! Resolution results.

use serde::Serialize;

/// A route matched to a concrete handler.
///
/// Produced once per resolution and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    controller_id: String,
    presenter_id: String,
    action_token: String,
    bundle: String,
    params: Vec<String>,
}

impl MatchedRoute {
    /// Creates a matched route. The bundle name is stored lowercase.
    pub fn new(
        controller_id: impl Into<String>,
        presenter_id: impl Into<String>,
        action_token: impl Into<String>,
        bundle: &str,
        params: Vec<String>,
    ) -> Self {
        Self {
            controller_id: controller_id.into(),
            presenter_id: presenter_id.into(),
            action_token: action_token.into(),
            bundle: bundle.to_lowercase(),
            params,
        }
    }

    /// Identifier of the handler (`App\Action\IndexAction`).
    pub fn controller_id(&self) -> &str {
        &self.controller_id
    }

    /// Identifier of the presenter (`App\Responder\IndexResponder`).
    pub fn presenter_id(&self) -> &str {
        &self.presenter_id
    }

    /// Action token: the raw action segment, or the method token.
    pub fn action_token(&self) -> &str {
        &self.action_token
    }

    /// Lowercase name of the bundle that matched.
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Positional parameters, in path order.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Outcome of one [`RouteResolver::resolve`](super::RouteResolver::resolve) call.
///
/// A resolution always knows the request's language; it carries a
/// [`MatchedRoute`] only when a handler was found. No match is a normal
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    language: String,
    route: Option<MatchedRoute>,
}

impl Resolution {
    pub(crate) fn new(language: String, route: Option<MatchedRoute>) -> Self {
        Self { language, route }
    }

    /// Returns `true` if a handler was found.
    pub fn is_matched(&self) -> bool {
        self.route.is_some()
    }

    /// Returns the language recorded from the path, or the default one.
    pub fn current_language(&self) -> &str {
        &self.language
    }

    /// Returns the matched route, if any.
    pub fn route(&self) -> Option<&MatchedRoute> {
        self.route.as_ref()
    }

    /// Consumes the resolution and returns the matched route, if any.
    pub fn into_route(self) -> Option<MatchedRoute> {
        self.route
    }

    /// Lowercase bundle name of the match.
    pub fn bundle(&self) -> Option<&str> {
        self.route.as_ref().map(MatchedRoute::bundle)
    }

    /// Action token of the match.
    pub fn action_token(&self) -> Option<&str> {
        self.route.as_ref().map(MatchedRoute::action_token)
    }

    /// Handler identifier of the match.
    pub fn controller_id(&self) -> Option<&str> {
        self.route.as_ref().map(MatchedRoute::controller_id)
    }

    /// Presenter identifier of the match.
    pub fn presenter_id(&self) -> Option<&str> {
        self.route.as_ref().map(MatchedRoute::presenter_id)
    }

    /// Positional parameters of the match; empty when unmatched.
    pub fn params(&self) -> &[String] {
        self.route
            .as_ref()
            .map(MatchedRoute::params)
            .unwrap_or_default()
    }
}
