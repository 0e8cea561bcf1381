//! Action dispatcher.
//!
//! The [`Dispatcher`] turns a resolution into a response:
//!
//! 1. No matched route → [`DispatchError::RouteNotFound`]
//! 2. The handler identifier is not an action →
//!    [`DispatchError::InvalidActionType`]
//! 3. The action is built from the registry
//! 4. [`BEFORE_DISPATCH`] fires; a listener that sets a [`Response`] as the
//!    event result short-circuits the dispatch
//! 5. The action is invoked with the route's parameters
//! 6. [`AFTER_DISPATCH`] fires; listeners may replace the response
//!
//! ```rust,ignore
//! use adroit_framework::{BEFORE_DISPATCH, BeforeDispatch};
//!
//! events.attach(BEFORE_DISPATCH, |event| {
//!     let blocked = event
//!         .payload::<BeforeDispatch>()
//!         .is_some_and(|p| p.request.header("x-banned").is_some());
//!     if blocked {
//!         event.set_result(Response::text("Forbidden").with_status(403));
//!         event.stop_immediate_propagation()?;
//!     }
//!     Ok(())
//! }, 100);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use adroit_core::{EventBus, MatchedRoute, Request, Resolution, Response};
use tracing::{Level, debug, span, trace};

use crate::action::Action;
use crate::context::ActionContext;
use crate::error::{DispatchError, DispatchResult};
use crate::registry::ComponentRegistry;

/// Fired after the action is built and before it runs.
pub const BEFORE_DISPATCH: &str = "dispatcher.before_dispatch";

/// Fired after the action returned a response.
pub const AFTER_DISPATCH: &str = "dispatcher.after_dispatch";

/// Payload of [`BEFORE_DISPATCH`].
///
/// Listeners may swap the action; the dispatcher invokes whatever is in
/// `action` once the event returns.
#[derive(Debug)]
pub struct BeforeDispatch {
    /// The request being dispatched.
    pub request: Arc<Request>,
    /// The matched route.
    pub route: MatchedRoute,
    /// The action about to run.
    pub action: Box<dyn Action>,
}

/// Payload of [`AFTER_DISPATCH`].
#[derive(Debug)]
pub struct AfterDispatch {
    /// The request that was dispatched.
    pub request: Arc<Request>,
    /// The matched route.
    pub route: MatchedRoute,
    /// The response that will be returned.
    pub response: Response,
}

/// Builds and invokes actions for matched routes.
///
/// The dispatcher is the subject of both lifecycle events, so listeners
/// can reach it with `event.subject::<Dispatcher>()`.
#[derive(Clone)]
pub struct Dispatcher {
    events: Arc<EventBus>,
    registry: Arc<ComponentRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over an event bus and a component registry.
    pub fn new(events: Arc<EventBus>, registry: Arc<ComponentRegistry>) -> Self {
        Self { events, registry }
    }

    /// Returns the event bus lifecycle events are fired on.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Returns the component registry actions are built from.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Dispatches a resolution.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::RouteNotFound`] if the resolution has no route.
    /// - [`DispatchError::InvalidActionType`] if the handler identifier does
    ///   not name an action.
    /// - [`DispatchError::Event`] if a lifecycle listener fails.
    /// - [`DispatchError::Handler`] if the action fails.
    pub fn dispatch(
        &self,
        resolution: &Resolution,
        request: Arc<Request>,
    ) -> DispatchResult<Response> {
        let route = resolution.route().ok_or(DispatchError::RouteNotFound)?;

        let span = span!(
            Level::DEBUG,
            "dispatch",
            controller = %route.controller_id(),
            bundle = %route.bundle()
        );
        let _enter = span.enter();

        let action = self.registry.build_action(route.controller_id()).ok_or_else(|| {
            DispatchError::InvalidActionType {
                id: route.controller_id().to_string(),
            }
        })?;
        trace!("Action built");

        let mut before = BeforeDispatch {
            request: Arc::clone(&request),
            route: route.clone(),
            action,
        };
        let mut event = self.events.dispatch(
            BEFORE_DISPATCH,
            Some(self as &dyn Any),
            Some(&mut before as &mut dyn Any),
            true,
        )?;
        if let Some(response) = event.take_result::<Response>() {
            debug!(status = response.status(), "Dispatch short-circuited by listener");
            return Ok(response);
        }
        drop(event);

        let responder = self.registry.build_responder(route.presenter_id());
        let mut ctx = ActionContext::new(
            &request,
            route,
            resolution.current_language(),
            responder,
        );
        let response = before
            .action
            .invoke(&mut ctx, route.params())
            .map_err(DispatchError::Handler)?;
        trace!(status = response.status(), "Action invoked");

        let mut after = AfterDispatch {
            request,
            route: route.clone(),
            response,
        };
        self.events.dispatch(
            AFTER_DISPATCH,
            Some(self as &dyn Any),
            Some(&mut after as &mut dyn Any),
            true,
        )?;

        Ok(after.response)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("events", &self.events)
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use adroit_core::{BoxError, Bundles, DEFAULT_PRIORITY, LanguageConfig, RouteResolver};
    use serde_json::{Value, json};

    use super::*;

    struct Echo;

    impl Action for Echo {
        fn invoke(
            &mut self,
            ctx: &mut ActionContext<'_>,
            params: &[String],
        ) -> Result<Response, BoxError> {
            ctx.respond(&json!({ "token": ctx.route().action_token(), "params": params }))
        }
    }

    fn failing() -> impl Action {
        |_: &mut ActionContext<'_>, _: &[String]| -> Result<Response, BoxError> {
            Err("storage offline".into())
        }
    }

    struct Fixture {
        dispatcher: Dispatcher,
        resolver: RouteResolver,
        bundles: Bundles,
    }

    impl Fixture {
        fn new(registry: ComponentRegistry) -> Self {
            Self {
                dispatcher: Dispatcher::new(Arc::new(EventBus::new()), Arc::new(registry)),
                resolver: RouteResolver::new(LanguageConfig::default()),
                bundles: Bundles::new().with("App", "App\\").unwrap(),
            }
        }

        fn run(&self, path: &str) -> DispatchResult<Response> {
            let registry = Arc::clone(self.dispatcher.registry());
            let resolution =
                self.resolver
                    .resolve(path, "GET", &self.bundles, |id| registry.exists(id));
            self.dispatcher
                .dispatch(&resolution, Arc::new(Request::new("GET", path)))
        }
    }

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register_action("App\\Action\\FooAction", || Echo).unwrap();
        registry.register_action("App\\Action\\FailAction", failing).unwrap();
        registry
            .register_responder("App\\Action\\NotAnAction", || {
                |_: &Request, _: &MatchedRoute, _: Value| -> Result<Response, BoxError> {
                    Ok(Response::ok())
                }
            })
            .unwrap();
        registry
    }

    fn body(response: &Response) -> Value {
        serde_json::from_str(response.body()).unwrap()
    }

    #[test]
    fn test_dispatch_invokes_action_with_params() {
        let fx = Fixture::new(registry());
        let response = fx.run("/foo/a/b").unwrap();
        assert_eq!(body(&response), json!({ "token": "foo", "params": ["a", "b"] }));
    }

    #[test]
    fn test_unmatched_route_is_not_found() {
        let fx = Fixture::new(registry());
        let err = fx.run("/missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_non_action_component_is_invalid() {
        let fx = Fixture::new(registry());
        let err = fx.run("/not-an").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::InvalidActionType { ref id } if id == "App\\Action\\NotAnAction"
        ));
    }

    #[test]
    fn test_handler_error_propagates() {
        let fx = Fixture::new(registry());
        let err = fx.run("/fail").unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
        assert_eq!(err.to_string(), "action failed: storage offline");
    }

    #[test]
    fn test_before_dispatch_short_circuit() {
        let fx = Fixture::new(registry());
        let invoked_after = Arc::new(AtomicUsize::new(0));

        fx.dispatcher.events().attach(
            BEFORE_DISPATCH,
            |event| {
                assert!(event.subject::<Dispatcher>().is_some());
                assert!(event.payload::<BeforeDispatch>().is_some());
                event.set_result(Response::text("cached"));
                Ok(())
            },
            DEFAULT_PRIORITY,
        );
        let counter = Arc::clone(&invoked_after);
        fx.dispatcher.events().attach(
            AFTER_DISPATCH,
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let response = fx.run("/foo").unwrap();
        assert_eq!(response.body(), "cached");
        assert_eq!(invoked_after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_response_result_does_not_short_circuit() {
        let fx = Fixture::new(registry());
        fx.dispatcher.events().attach(
            BEFORE_DISPATCH,
            |event| {
                event.set_result("not a response");
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let response = fx.run("/foo").unwrap();
        assert_eq!(body(&response)["token"], "foo");
    }

    #[test]
    fn test_before_dispatch_can_replace_action() {
        let fx = Fixture::new(registry());
        fx.dispatcher.events().attach(
            BEFORE_DISPATCH,
            |event| {
                if let Some(payload) = event.payload_mut::<BeforeDispatch>() {
                    payload.action = Box::new(
                        |_: &mut ActionContext<'_>, _: &[String]| -> Result<Response, BoxError> {
                            Ok(Response::text("replaced"))
                        },
                    );
                }
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        assert_eq!(fx.run("/foo").unwrap().body(), "replaced");
    }

    #[test]
    fn test_after_dispatch_can_replace_response() {
        let fx = Fixture::new(registry());
        fx.dispatcher.events().attach(
            AFTER_DISPATCH,
            |event| {
                if let Some(payload) = event.payload_mut::<AfterDispatch>() {
                    assert_eq!(payload.route.action_token(), "foo");
                    payload.response.set_header("x-handled-by", "listener");
                }
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let response = fx.run("/foo").unwrap();
        assert_eq!(response.header("x-handled-by"), Some("listener"));
    }

    #[test]
    fn test_listener_error_aborts_dispatch() {
        let fx = Fixture::new(registry());
        fx.dispatcher
            .events()
            .attach(AFTER_DISPATCH, |_| Err("audit log full".into()), DEFAULT_PRIORITY);

        let err = fx.run("/foo").unwrap_err();
        assert!(matches!(err, DispatchError::Event(_)));
    }

    #[test]
    fn test_responder_is_used_when_registered() {
        let mut registry = registry();
        registry
            .register_responder("App\\Responder\\FooResponder", || {
                |_: &Request, _: &MatchedRoute, payload: Value| -> Result<Response, BoxError> {
                    Ok(Response::text(format!("<p>{}</p>", payload["token"])))
                }
            })
            .unwrap();
        let fx = Fixture::new(registry);

        assert_eq!(fx.run("/foo").unwrap().body(), "<p>\"foo\"</p>");
    }
}
