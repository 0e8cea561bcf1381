//! Application front controller.
//!
//! [`Application::bootstrap`] scans the configured bundles, registers their
//! components and wires the router, the event bus and the dispatcher
//! together. After bootstrap the application is read-only apart from the
//! event bus, which stays open for listener registration.
//!
//! ```rust,ignore
//! use adroit_runtime::{Application, config::load_config};
//!
//! let config = load_config()?;
//! let app = Application::from_linked(&config)?;
//!
//! let response = app.handle(&Request::new("GET", "/blog/post/42"));
//! ```

use std::fmt;
use std::sync::Arc;

use adroit_core::{
    APP_BUNDLE, Bundle, Bundles, EventBus, Request, Resolution, Response, RouteResolver,
};
use adroit_framework::{BUNDLES, BundleDescriptor, ComponentRegistry, DispatchResult, Dispatcher};
use tracing::{Level, debug, error, info, span, trace};

use crate::config::{AdroitConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};

/// Owns the loaded bundles and routes requests to actions.
pub struct Application {
    bundles: Bundles,
    resolver: RouteResolver,
    dispatcher: Dispatcher,
}

impl Application {
    /// Bootstraps an application from configuration and bundle descriptors.
    ///
    /// Enabled bundles are loaded in configuration order, each under its
    /// configured namespace or the descriptor's default. When
    /// `app_fallback` is set and `App` is not listed at all, an `App`
    /// descriptor, if one is available, is loaded last.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Config`] if the configuration is invalid.
    /// - [`RuntimeError::UnknownBundle`] if a listed bundle has no
    ///   descriptor.
    /// - [`RuntimeError::Bundle`] or [`RuntimeError::Registry`] if a bundle
    ///   cannot be loaded.
    pub fn bootstrap(config: &AdroitConfig, descriptors: &[BundleDescriptor]) -> RuntimeResult<Self> {
        validate_config(config)?;

        let span = span!(Level::DEBUG, "bootstrap", descriptors = descriptors.len());
        let _enter = span.enter();

        let mut bundles = Bundles::new();
        let mut registry = ComponentRegistry::new();

        for entry in &config.bundles {
            if !entry.enabled {
                debug!(bundle = %entry.name, "Bundle disabled, skipping");
                continue;
            }
            let descriptor = find_descriptor(descriptors, &entry.name)
                .ok_or_else(|| RuntimeError::UnknownBundle(entry.name.clone()))?;
            let namespace = entry.namespace.as_deref().unwrap_or(descriptor.namespace);
            load_bundle(&mut bundles, &mut registry, descriptor, namespace)?;
        }

        if config.app_fallback && !config.bundles.iter().any(|b| b.name == APP_BUNDLE) {
            match find_descriptor(descriptors, APP_BUNDLE) {
                Some(app) => {
                    debug!("Appending App fallback bundle");
                    load_bundle(&mut bundles, &mut registry, app, app.namespace)?;
                }
                None => trace!("No App bundle available for fallback"),
            }
        }

        info!(
            bundles = bundles.len(),
            components = registry.len(),
            languages = ?config.languages.possible,
            "Application bootstrapped"
        );

        Ok(Self {
            bundles,
            resolver: RouteResolver::new((&config.languages).into()),
            dispatcher: Dispatcher::new(Arc::new(EventBus::new()), Arc::new(registry)),
        })
    }

    /// Bootstraps from the bundles linked into the binary via [`BUNDLES`].
    pub fn from_linked(config: &AdroitConfig) -> RuntimeResult<Self> {
        Self::bootstrap(config, &BUNDLES)
    }

    /// Resolves a request without dispatching it.
    pub fn resolve(&self, request: &Request) -> Resolution {
        let registry = self.dispatcher.registry();
        self.resolver.resolve(
            request.path(),
            request.method(),
            &self.bundles,
            |id: &str| registry.exists(id),
        )
    }

    /// Resolves and dispatches a request, returning the raw result.
    pub fn try_handle(&self, request: &Request) -> DispatchResult<Response> {
        let resolution = self.resolve(request);
        self.dispatcher
            .dispatch(&resolution, Arc::new(request.clone()))
    }

    /// Handles a request, mapping failures to status codes.
    ///
    /// An unmatched route becomes 404; every other failure becomes 500 and
    /// is logged.
    pub fn handle(&self, request: &Request) -> Response {
        match self.try_handle(request) {
            Ok(response) => response,
            Err(err) if err.is_not_found() => {
                debug!(method = %request.method(), path = %request.path(), "Not found");
                Response::not_found()
            }
            Err(err) => {
                error!(
                    method = %request.method(),
                    path = %request.path(),
                    error = %err,
                    "Request failed"
                );
                Response::text("Internal Server Error").with_status(500)
            }
        }
    }

    /// Returns the event bus, for attaching listeners.
    pub fn events(&self) -> &Arc<EventBus> {
        self.dispatcher.events()
    }

    /// Returns the component registry.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        self.dispatcher.registry()
    }

    /// Returns the loaded bundles.
    pub fn bundles(&self) -> &Bundles {
        &self.bundles
    }

    /// Returns the router.
    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("bundles", &self.bundles)
            .field("resolver", &self.resolver)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

fn find_descriptor<'a>(descriptors: &'a [BundleDescriptor], name: &str) -> Option<&'a BundleDescriptor> {
    descriptors.iter().find(|d| d.name == name)
}

fn load_bundle(
    bundles: &mut Bundles,
    registry: &mut ComponentRegistry,
    descriptor: &BundleDescriptor,
    namespace: &str,
) -> RuntimeResult<()> {
    bundles.load(Bundle::new(descriptor.name, namespace)?)?;
    descriptor.register_into(registry, namespace)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use adroit_core::{BoxError, DEFAULT_PRIORITY};
    use adroit_framework::{
        AFTER_DISPATCH, Action, ActionContext, BEFORE_DISPATCH, BeforeDispatch, bundle,
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::config::BundleConfig;

    #[derive(Default)]
    struct Echo;

    impl Action for Echo {
        fn invoke(
            &mut self,
            ctx: &mut ActionContext<'_>,
            params: &[String],
        ) -> Result<Response, BoxError> {
            ctx.respond(&json!({
                "controller": ctx.route().controller_id(),
                "token": ctx.route().action_token(),
                "language": ctx.language(),
                "params": params,
            }))
        }
    }

    #[derive(Default)]
    struct Broken;

    impl Action for Broken {
        fn invoke(
            &mut self,
            _ctx: &mut ActionContext<'_>,
            _params: &[String],
        ) -> Result<Response, BoxError> {
            Err("database unavailable".into())
        }
    }

    fn post_page(
        _: &Request,
        _: &adroit_core::MatchedRoute,
        payload: Value,
    ) -> Result<Response, BoxError> {
        Ok(Response::text(format!("post {}", payload["params"][0])))
    }

    static APP: BundleDescriptor = bundle! {
        name: "App",
        namespace: "App\\",
        actions: {
            "Index" => Echo::default,
            "Foo" => Echo::default,
            "Broken" => Broken::default,
        },
    };

    static BLOG: BundleDescriptor = bundle! {
        name: "Blog",
        namespace: "Blog\\",
        actions: {
            "Index" => Echo::default,
            "Post" => Echo::default,
        },
        responders: {
            "Post" => || post_page,
        },
    };

    fn config(bundles: Vec<BundleConfig>) -> AdroitConfig {
        let mut config = AdroitConfig {
            bundles,
            ..Default::default()
        };
        config.languages.possible = vec!["en".into(), "fr".into()];
        config
    }

    fn app() -> Application {
        Application::bootstrap(&config(vec![BundleConfig::named("Blog")]), &[APP, BLOG]).unwrap()
    }

    fn body(response: &Response) -> Value {
        serde_json::from_str(response.body()).unwrap()
    }

    #[test]
    fn test_bootstrap_appends_app_fallback() {
        let app = app();
        let names: Vec<&str> = app.bundles().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Blog", "App"]);
        assert!(app.registry().exists("App\\Action\\IndexAction"));
        assert!(app.registry().exists("Blog\\Responder\\PostResponder"));
    }

    #[test]
    fn test_bootstrap_without_fallback() {
        let mut config = config(vec![BundleConfig::named("Blog")]);
        config.app_fallback = false;
        let app = Application::bootstrap(&config, &[APP, BLOG]).unwrap();
        assert_eq!(app.bundles().len(), 1);
        assert_eq!(app.handle(&Request::new("GET", "/foo")).status(), 404);
    }

    #[test]
    fn test_disabled_app_is_not_appended() {
        let mut blog_only = config(vec![BundleConfig::named("Blog"), BundleConfig::named("App")]);
        blog_only.bundles[1].enabled = false;
        let app = Application::bootstrap(&blog_only, &[APP, BLOG]).unwrap();
        assert!(app.bundles().get("App").is_none());
    }

    #[test]
    fn test_unknown_bundle() {
        let err = Application::bootstrap(&config(vec![BundleConfig::named("Shop")]), &[APP])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownBundle(name) if name == "Shop"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = config(vec![]);
        config.languages.default = "de".into();
        let err = Application::bootstrap(&config, &[APP]).unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[test]
    fn test_namespace_override() {
        let app = Application::bootstrap(
            &config(vec![BundleConfig::new("Blog", "Acme\\Blog\\")]),
            &[APP, BLOG],
        )
        .unwrap();
        let resolution = app.resolve(&Request::new("GET", "/blog"));
        assert_eq!(resolution.controller_id(), Some("Acme\\Blog\\Action\\IndexAction"));
    }

    #[test]
    fn test_bundle_route_with_responder() {
        let response = app().handle(&Request::new("GET", "/blog/post/42"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "post \"42\"");
    }

    #[test]
    fn test_app_fallback_route() {
        let response = app().handle(&Request::new("GET", "/foo/a/b"));
        assert_eq!(
            body(&response),
            json!({
                "controller": "App\\Action\\FooAction",
                "token": "foo",
                "language": "en",
                "params": ["a", "b"],
            })
        );
    }

    #[test]
    fn test_language_prefix() {
        let app = app();
        let request = Request::new("GET", "/fr/blog");
        assert_eq!(app.resolve(&request).current_language(), "fr");
        assert_eq!(body(&app.handle(&request))["language"], "fr");
    }

    #[test]
    fn test_status_mapping() {
        let app = app();
        assert_eq!(app.handle(&Request::new("GET", "/broken")).status(), 500);
        assert!(app.try_handle(&Request::new("GET", "/broken")).is_err());

        // App's index action catches everything else; the first parameter
        // is the bundle segment.
        let fallback = app.handle(&Request::new("GET", "/nowhere/at/all"));
        assert_eq!(body(&fallback)["controller"], "App\\Action\\IndexAction");
        assert_eq!(body(&fallback)["params"], json!(["App", "nowhere", "at", "all"]));
    }

    #[test]
    fn test_listeners_via_events() {
        let app = app();
        app.events().attach(
            BEFORE_DISPATCH,
            |event| {
                let blocked = event
                    .payload::<BeforeDispatch>()
                    .is_some_and(|p| p.request.header("x-blocked").is_some());
                if blocked {
                    event.set_result(Response::text("Forbidden").with_status(403));
                    event.stop_immediate_propagation()?;
                }
                Ok(())
            },
            DEFAULT_PRIORITY,
        );
        app.events().attach(
            AFTER_DISPATCH,
            |event| {
                if let Some(after) = event.payload_mut::<adroit_framework::AfterDispatch>() {
                    after.response.set_header("x-powered-by", "adroit");
                }
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let blocked = app.handle(&Request::new("GET", "/blog").with_header("X-Blocked", "1"));
        assert_eq!(blocked.status(), 403);

        let allowed = app.handle(&Request::new("GET", "/blog"));
        assert_eq!(allowed.header("x-powered-by"), Some("adroit"));
    }
}
