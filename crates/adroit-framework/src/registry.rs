//! Component registry.
//!
//! Maps fully-qualified identifiers (`Blog\Action\PostAction`) to factories.
//! The registry is filled once during the bundle scan and is read-only
//! afterwards: the router asks it whether an identifier exists, the
//! dispatcher asks it to build the action and the responder.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use adroit_core::NAMESPACE_SEPARATOR;
use adroit_core::bundle::namespace_segments;
use adroit_core::routing::{ACTION_SEGMENT, RESPONDER_SEGMENT};
use tracing::trace;

use crate::action::{Action, Responder};
use crate::error::{RegistryError, RegistryResult};

/// Factory building a fresh action.
pub type ActionFactory = Arc<dyn Fn() -> Box<dyn Action> + Send + Sync>;

/// Factory building a fresh responder.
pub type ResponderFactory = Arc<dyn Fn() -> Box<dyn Responder> + Send + Sync>;

/// A registered component.
#[derive(Clone)]
pub enum Component {
    /// Something the dispatcher can invoke.
    Action(ActionFactory),
    /// Something that renders action output.
    Responder(ResponderFactory),
}

impl Component {
    /// Returns a short name of the component kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::Responder(_) => "responder",
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Factory map keyed by component identifier.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] if the identifier is taken.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        component: Component,
    ) -> RegistryResult<()> {
        let id = id.into();
        if self.components.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        trace!(%id, kind = component.kind(), "Registered component");
        self.components.insert(id, component);
        Ok(())
    }

    /// Registers an action factory.
    pub fn register_action<A, F>(
        &mut self,
        id: impl Into<String>,
        factory: F,
    ) -> RegistryResult<()>
    where
        A: Action + 'static,
        F: Fn() -> A + Send + Sync + 'static,
    {
        self.register(
            id,
            Component::Action(Arc::new(move || Box::new(factory()) as Box<dyn Action>)),
        )
    }

    /// Registers a responder factory.
    pub fn register_responder<R, F>(
        &mut self,
        id: impl Into<String>,
        factory: F,
    ) -> RegistryResult<()>
    where
        R: Responder + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.register(
            id,
            Component::Responder(Arc::new(move || Box::new(factory()) as Box<dyn Responder>)),
        )
    }

    /// Returns `true` if any component is registered under `id`.
    ///
    /// This is the existence check the router probes candidates with.
    pub fn exists(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Returns the component registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Returns `true` if `id` names an action.
    pub fn is_action(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Component::Action(_)))
    }

    /// Builds the action registered under `id`.
    ///
    /// Returns `None` if nothing or a non-action is registered there.
    pub fn build_action(&self, id: &str) -> Option<Box<dyn Action>> {
        match self.get(id)? {
            Component::Action(factory) => Some(factory()),
            Component::Responder(_) => None,
        }
    }

    /// Builds the responder registered under `id`.
    pub fn build_responder(&self, id: &str) -> Option<Box<dyn Responder>> {
        match self.get(id)? {
            Component::Responder(factory) => Some(factory()),
            Component::Action(_) => None,
        }
    }

    /// Returns the registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.components.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.ids())
            .finish()
    }
}

/// Registration view scoped to one bundle's namespace.
///
/// Names are given relative to the namespace and the kind segment:
/// `scope.action("Post\\Show", ...)` under `Blog\` registers
/// `Blog\Action\Post\ShowAction`.
pub struct BundleScope<'a> {
    registry: &'a mut ComponentRegistry,
    namespace: Vec<String>,
}

impl<'a> BundleScope<'a> {
    /// Creates a scope for the given namespace prefix.
    pub fn new(registry: &'a mut ComponentRegistry, namespace: &str) -> Self {
        Self {
            registry,
            namespace: namespace_segments(namespace)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns the identifier `name` gets under `kind` (`Action` or
    /// `Responder`).
    pub fn qualify(&self, kind: &str, name: &str) -> String {
        let separator = NAMESPACE_SEPARATOR.to_string();
        let mut segments: Vec<&str> = self.namespace.iter().map(String::as_str).collect();
        segments.push(kind);
        segments.extend(namespace_segments(name));

        let mut id = segments.join(&separator);
        id.push_str(kind);
        id
    }

    /// Registers an action under this namespace.
    pub fn action<A, F>(&mut self, name: &str, factory: F) -> RegistryResult<()>
    where
        A: Action + 'static,
        F: Fn() -> A + Send + Sync + 'static,
    {
        let id = self.qualify(ACTION_SEGMENT, name);
        self.registry.register_action(id, factory)
    }

    /// Registers a responder under this namespace.
    pub fn responder<R, F>(&mut self, name: &str, factory: F) -> RegistryResult<()>
    where
        R: Responder + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let id = self.qualify(RESPONDER_SEGMENT, name);
        self.registry.register_responder(id, factory)
    }
}

#[cfg(test)]
mod tests {
    use adroit_core::{BoxError, MatchedRoute, Request, Response};
    use serde_json::Value;

    use super::*;
    use crate::context::ActionContext;

    fn index() -> impl Action {
        |_: &mut ActionContext<'_>, _: &[String]| -> Result<Response, BoxError> {
            Ok(Response::text("index"))
        }
    }

    fn plain() -> impl Responder {
        |_: &Request, _: &MatchedRoute, _: Value| -> Result<Response, BoxError> {
            Ok(Response::text("plain"))
        }
    }

    #[test]
    fn test_register_and_build() {
        let mut registry = ComponentRegistry::new();
        registry.register_action("App\\Action\\IndexAction", index).unwrap();
        registry
            .register_responder("App\\Responder\\IndexResponder", plain)
            .unwrap();

        assert!(registry.exists("App\\Action\\IndexAction"));
        assert!(registry.exists("App\\Responder\\IndexResponder"));
        assert!(!registry.exists("App\\Action\\MissingAction"));

        assert!(registry.is_action("App\\Action\\IndexAction"));
        assert!(!registry.is_action("App\\Responder\\IndexResponder"));

        assert!(registry.build_action("App\\Action\\IndexAction").is_some());
        assert!(registry.build_action("App\\Responder\\IndexResponder").is_none());
        assert!(registry.build_responder("App\\Responder\\IndexResponder").is_some());
        assert!(registry.build_responder("App\\Action\\IndexAction").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.register_action("App\\Action\\IndexAction", index).unwrap();
        let err = registry
            .register_action("App\\Action\\IndexAction", index)
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("App\\Action\\IndexAction".into()));
    }

    #[test]
    fn test_scope_qualifies_names() {
        let mut registry = ComponentRegistry::new();
        let mut scope = BundleScope::new(&mut registry, "Blog\\");
        assert_eq!(scope.qualify("Action", "Post"), "Blog\\Action\\PostAction");
        assert_eq!(
            scope.qualify("Responder", "Post\\Show"),
            "Blog\\Responder\\Post\\ShowResponder"
        );

        scope.action("Index", index).unwrap();
        scope.responder("Index", plain).unwrap();
        assert_eq!(
            registry.ids(),
            vec!["Blog\\Action\\IndexAction", "Blog\\Responder\\IndexResponder"]
        );
    }

    #[test]
    fn test_scope_multi_segment_namespace() {
        let mut registry = ComponentRegistry::new();
        let mut scope = BundleScope::new(&mut registry, "Acme\\Shop\\");
        scope.action("Cart", index).unwrap();
        assert!(registry.exists("Acme\\Shop\\Action\\CartAction"));
    }
}
