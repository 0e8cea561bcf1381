//! Loaded bundles and their namespace prefixes.
//!
//! A bundle is a self-contained application module. The router only needs
//! two things from it: its name (matched against the first path segment)
//! and its namespace prefix (prepended to candidate identifiers).
//!
//! Bundles are loaded once at bootstrap; the registry is read-only while
//! requests are being routed.

use tracing::debug;

use crate::error::{BundleError, BundleResult};
use crate::inflector::camelize;

/// Name of the conventional fallback bundle.
pub const APP_BUNDLE: &str = "App";

/// Separator between identifier segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Read-only view of the loaded bundles consumed by the router.
pub trait BundleRegistry {
    /// Returns the names of all loaded bundles, in load order.
    fn loaded_bundle_names(&self) -> Vec<&str>;

    /// Returns the namespace prefix of a loaded bundle.
    fn namespace_prefix(&self, name: &str) -> Option<&str>;

    /// Returns `true` if a bundle with this name is loaded.
    fn is_loaded(&self, name: &str) -> bool {
        self.namespace_prefix(name).is_some()
    }
}

/// A loaded bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    namespace: String,
}

impl Bundle {
    /// Creates a bundle.
    ///
    /// The name must already be in camelized form (`Blog`, `AdminPanel`)
    /// because it is compared against camelized path segments.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> BundleResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BundleError::InvalidName {
                name,
                reason: "name must not be empty",
            });
        }
        if camelize(&name) != name {
            return Err(BundleError::InvalidName {
                name,
                reason: "name must be camelized",
            });
        }

        Ok(Self {
            name,
            namespace: namespace.into(),
        })
    }

    /// Returns the bundle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw namespace prefix (e.g. `Blog\`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the namespace prefix split into non-empty segments.
    pub fn namespace_segments(&self) -> Vec<&str> {
        namespace_segments(&self.namespace)
    }
}

/// Splits a namespace prefix into its non-empty segments.
pub fn namespace_segments(namespace: &str) -> Vec<&str> {
    namespace
        .split(NAMESPACE_SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Ordered set of loaded bundles.
#[derive(Debug, Clone, Default)]
pub struct Bundles {
    loaded: Vec<Bundle>,
}

impl Bundles {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a bundle, appending it to the load order.
    pub fn load(&mut self, bundle: Bundle) -> BundleResult<()> {
        if self.get(bundle.name()).is_some() {
            return Err(BundleError::Duplicate(bundle.name));
        }
        debug!(bundle = %bundle.name, namespace = %bundle.namespace, "Loaded bundle");
        self.loaded.push(bundle);
        Ok(())
    }

    /// Loads a bundle (builder pattern).
    pub fn with(mut self, name: &str, namespace: &str) -> BundleResult<Self> {
        self.load(Bundle::new(name, namespace)?)?;
        Ok(self)
    }

    /// Looks up a loaded bundle by name.
    pub fn get(&self, name: &str) -> Option<&Bundle> {
        self.loaded.iter().find(|b| b.name == name)
    }

    /// Iterates over the loaded bundles in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Bundle> {
        self.loaded.iter()
    }

    /// Returns the number of loaded bundles.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Returns `true` if no bundle is loaded.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl BundleRegistry for Bundles {
    fn loaded_bundle_names(&self) -> Vec<&str> {
        self.loaded.iter().map(|b| b.name.as_str()).collect()
    }

    fn namespace_prefix(&self, name: &str) -> Option<&str> {
        self.get(name).map(|b| b.namespace.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_order_is_preserved() {
        let bundles = Bundles::new()
            .with("Blog", "Blog\\")
            .and_then(|b| b.with("App", "App\\"))
            .unwrap();
        assert_eq!(bundles.loaded_bundle_names(), vec!["Blog", "App"]);
        assert_eq!(bundles.namespace_prefix("Blog"), Some("Blog\\"));
        assert!(bundles.is_loaded("App"));
        assert!(!bundles.is_loaded("Shop"));
    }

    #[test]
    fn test_duplicate_bundle_rejected() {
        let mut bundles = Bundles::new();
        bundles.load(Bundle::new("App", "App\\").unwrap()).unwrap();
        let err = bundles.load(Bundle::new("App", "Other\\").unwrap());
        assert_eq!(err, Err(BundleError::Duplicate("App".into())));
        assert_eq!(bundles.len(), 1);
    }

    #[test]
    fn test_name_must_be_camelized() {
        assert!(matches!(
            Bundle::new("blog", "Blog\\"),
            Err(BundleError::InvalidName { .. })
        ));
        assert!(matches!(
            Bundle::new("", "Blog\\"),
            Err(BundleError::InvalidName { .. })
        ));
        assert!(Bundle::new("AdminPanel", "Admin\\Panel\\").is_ok());
    }

    #[test]
    fn test_namespace_segments() {
        let bundle = Bundle::new("AdminPanel", "\\Acme\\Admin\\").unwrap();
        assert_eq!(bundle.namespace_segments(), vec!["Acme", "Admin"]);
    }
}
