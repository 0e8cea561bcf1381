//! Per-dispatch context handed to actions.

use adroit_core::{BoxError, MatchedRoute, Request, Response};
use serde::Serialize;

use crate::action::Responder;

/// What an [`Action`](crate::Action) sees of the current dispatch.
///
/// The context borrows the request and the matched route for the duration
/// of one invocation. When a responder is registered under the route's
/// presenter identifier, a fresh instance is attached and
/// [`respond`](Self::respond) renders through it.
pub struct ActionContext<'a> {
    request: &'a Request,
    route: &'a MatchedRoute,
    language: &'a str,
    responder: Option<Box<dyn Responder>>,
}

impl<'a> ActionContext<'a> {
    /// Creates a context.
    pub fn new(
        request: &'a Request,
        route: &'a MatchedRoute,
        language: &'a str,
        responder: Option<Box<dyn Responder>>,
    ) -> Self {
        Self {
            request,
            route,
            language,
            responder,
        }
    }

    /// Returns the request being handled.
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// Returns the matched route.
    pub fn route(&self) -> &'a MatchedRoute {
        self.route
    }

    /// Returns the language of the request.
    pub fn language(&self) -> &'a str {
        self.language
    }

    /// Returns the positional parameter at `index`.
    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.route.params().get(index).map(String::as_str)
    }

    /// Returns `true` if a responder is attached.
    pub fn has_responder(&self) -> bool {
        self.responder.is_some()
    }

    /// Builds a response from `payload`.
    ///
    /// The payload goes through the attached responder, or is rendered as
    /// JSON when there is none.
    pub fn respond<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Response, BoxError> {
        match &self.responder {
            Some(responder) => {
                let value = serde_json::to_value(payload)?;
                responder.respond(self.request, self.route, value)
            }
            None => Ok(Response::json(payload)),
        }
    }
}

impl std::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("request", &self.request)
            .field("route", &self.route)
            .field("language", &self.language)
            .field("has_responder", &self.responder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn route() -> MatchedRoute {
        MatchedRoute::new(
            "App\\Action\\PostAction",
            "App\\Responder\\PostResponder",
            "post",
            "App",
            vec!["42".into(), "edit".into()],
        )
    }

    #[test]
    fn test_accessors() {
        let request = Request::new("GET", "/post/42/edit");
        let route = route();
        let ctx = ActionContext::new(&request, &route, "fr", None);

        assert_eq!(ctx.request().path(), "/post/42/edit");
        assert_eq!(ctx.route().action_token(), "post");
        assert_eq!(ctx.language(), "fr");
        assert_eq!(ctx.param(0), Some("42"));
        assert_eq!(ctx.param(1), Some("edit"));
        assert_eq!(ctx.param(2), None);
        assert!(!ctx.has_responder());
    }

    #[test]
    fn test_respond_without_responder_is_json() {
        let request = Request::cli("/post/42");
        let route = route();
        let ctx = ActionContext::new(&request, &route, "en", None);

        let response = ctx.respond(&json!({ "id": 42 })).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["id"], 42);
    }

    #[test]
    fn test_respond_through_responder() {
        let request = Request::new("GET", "/post/42");
        let route = route();
        let responder = |_: &Request, route: &MatchedRoute, payload: Value| -> Result<Response, BoxError> {
            Ok(Response::text(format!(
                "{}:{}",
                route.action_token(),
                payload["title"].as_str().unwrap_or_default()
            )))
        };
        let ctx = ActionContext::new(&request, &route, "en", Some(Box::new(responder)));

        let response = ctx.respond(&json!({ "title": "Hello" })).unwrap();
        assert_eq!(response.body(), "post:Hello");
    }
}
