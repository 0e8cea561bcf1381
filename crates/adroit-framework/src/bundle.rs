//! Bundle descriptors.
//!
//! A bundle contributes components to the registry through a static,
//! `Copy` [`BundleDescriptor`]. Descriptors are either passed to the
//! runtime explicitly or collected from the [`BUNDLES`] distributed slice,
//! which any crate in the final binary can add to:
//!
//! ```rust,ignore
//! use adroit::prelude::*;
//!
//! #[distributed_slice(BUNDLES)]
//! #[linkme(crate = adroit::framework::linkme)]
//! static BLOG: BundleDescriptor = bundle! {
//!     name: "Blog",
//!     namespace: "Blog\\",
//!     actions: {
//!         "Index" => BlogIndex::default,
//!         "Post" => ShowPost::default,
//!     },
//!     responders: {
//!         "Post" => PostPage::default,
//!     },
//! };
//! ```

use linkme::distributed_slice;

use crate::error::RegistryResult;
use crate::registry::{BundleScope, ComponentRegistry};

/// Registration function stored in a descriptor.
pub type RegisterFn = fn(&mut BundleScope<'_>) -> RegistryResult<()>;

/// A static, `Copy` handle to a bundle.
#[derive(Debug, Clone, Copy)]
pub struct BundleDescriptor {
    /// Camelized bundle name, matched against the first path segment.
    pub name: &'static str,

    /// Default namespace prefix, e.g. `Blog\`.
    pub namespace: &'static str,

    /// Registers the bundle's components relative to a namespace.
    pub register: RegisterFn,
}

impl BundleDescriptor {
    /// Registers the bundle's components under `namespace`.
    ///
    /// The namespace may differ from [`Self::namespace`] when configuration
    /// overrides it.
    pub fn register_into(
        &self,
        registry: &mut ComponentRegistry,
        namespace: &str,
    ) -> RegistryResult<()> {
        let mut scope = BundleScope::new(registry, namespace);
        (self.register)(&mut scope)
    }
}

/// Bundles contributed by the crates linked into the binary.
#[distributed_slice]
pub static BUNDLES: [BundleDescriptor];

/// Finds a linked bundle by name.
pub fn find_bundle(name: &str) -> Option<&'static BundleDescriptor> {
    BUNDLES.iter().find(|b| b.name == name)
}

/// Creates a [`BundleDescriptor`].
///
/// # Syntax
///
/// ```rust,ignore
/// static APP: BundleDescriptor = bundle! {
///     name: "App",
///     namespace: "App\\",
///
///     // Relative name => factory
///     actions: {
///         "Index" => HomePage::default,
///         "Post\\Show" => || ShowPost { limit: 10 },
///     },
///
///     responders: {
///         "Post\\Show" => PostHtml::default,
///     },
/// };
/// ```
///
/// `actions` and `responders` are optional and must appear in this order.
/// Names are relative to the namespace: `"Post\\Show"` under `App\`
/// becomes `App\Action\Post\ShowAction`.
#[macro_export]
macro_rules! bundle {
    (
        name: $name:literal,
        namespace: $ns:literal
        $(, actions: { $($a:literal => $af:expr),* $(,)? })?
        $(, responders: { $($r:literal => $rf:expr),* $(,)? })?
        $(,)?
    ) => {
        $crate::BundleDescriptor {
            name: $name,
            namespace: $ns,
            register: {
                fn __adroit_register(
                    scope: &mut $crate::BundleScope<'_>,
                ) -> $crate::RegistryResult<()> {
                    $( $( scope.action($a, $af)?; )* )?
                    $( $( scope.responder($r, $rf)?; )* )?
                    let _ = scope;
                    ::std::result::Result::Ok(())
                }
                __adroit_register
            },
        }
    };
}

#[cfg(test)]
mod tests {
    use adroit_core::{BoxError, MatchedRoute, Request, Response};
    use serde_json::Value;

    use crate::action::{Action, Responder};
    use crate::context::ActionContext;
    use crate::registry::ComponentRegistry;

    use super::*;

    #[derive(Default)]
    struct Home;

    impl Action for Home {
        fn invoke(
            &mut self,
            _ctx: &mut ActionContext<'_>,
            _params: &[String],
        ) -> Result<Response, BoxError> {
            Ok(Response::text("home"))
        }
    }

    #[derive(Default)]
    struct Html;

    impl Responder for Html {
        fn respond(
            &self,
            _request: &Request,
            _route: &MatchedRoute,
            payload: Value,
        ) -> Result<Response, BoxError> {
            Ok(Response::text(payload.to_string()))
        }
    }

    static SHOP: BundleDescriptor = bundle! {
        name: "Shop",
        namespace: "Shop\\",
        actions: {
            "Index" => Home::default,
            "Cart\\Show" => Home::default,
        },
        responders: {
            "Cart\\Show" => Html::default,
        },
    };

    static EMPTY: BundleDescriptor = bundle! {
        name: "Empty",
        namespace: "Empty\\",
    };

    #[test]
    fn test_macro_registers_components() {
        let mut registry = ComponentRegistry::new();
        SHOP.register_into(&mut registry, SHOP.namespace).unwrap();

        assert_eq!(
            registry.ids(),
            vec![
                "Shop\\Action\\Cart\\ShowAction",
                "Shop\\Action\\IndexAction",
                "Shop\\Responder\\Cart\\ShowResponder",
            ]
        );
    }

    #[test]
    fn test_namespace_override() {
        let mut registry = ComponentRegistry::new();
        SHOP.register_into(&mut registry, "Acme\\Store\\").unwrap();
        assert!(registry.exists("Acme\\Store\\Action\\IndexAction"));
        assert!(!registry.exists("Shop\\Action\\IndexAction"));
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut registry = ComponentRegistry::new();
        SHOP.register_into(&mut registry, "Shop\\").unwrap();
        assert!(SHOP.register_into(&mut registry, "Shop\\").is_err());
    }

    #[test]
    fn test_empty_bundle() {
        let mut registry = ComponentRegistry::new();
        EMPTY.register_into(&mut registry, EMPTY.namespace).unwrap();
        assert!(registry.is_empty());
        assert_eq!(EMPTY.name, "Empty");
    }
}
