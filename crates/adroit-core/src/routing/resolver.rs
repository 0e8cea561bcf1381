//! Convention-based route resolution.
//!
//! The resolver maps a raw path onto a bundle and a handler identifier by
//! trying progressively shorter candidate identifiers until the existence
//! oracle recognises one:
//!
//! ```text
//! GET /blog/post/42
//!   raw    = [blog, post, 42, index]
//!   bundle = Blog (from the first segment), then App
//!   Blog\Action\Post\42\IndexAction       index
//!   Blog\Action\Post\42\GetMethodAction   method
//!   Blog\Action\Post\42\IndexAction       action
//!   Blog\Action\Post\42Action             index
//!   Blog\Action\Post\GetMethodAction      method  → params [42]
//!   ...
//!   Blog\Action\PostAction                index   → token "post", params [42]
//! ```

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, span, trace};

use crate::bundle::{APP_BUNDLE, BundleRegistry, namespace_segments};
use crate::inflector::{camelize, method_token};

use super::candidate::Candidate;
use super::route::{MatchedRoute, Resolution};

/// Raw segment appended to every path before resolution.
pub const DEFAULT_ACTION: &str = "index";

/// Languages recognised as a leading path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language tags that may prefix a path (`/en/...`).
    pub possible: Vec<String>,
    /// Language used when the path carries none.
    pub default: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            possible: vec!["en".to_string()],
            default: "en".to_string(),
        }
    }
}

impl LanguageConfig {
    /// Creates a language configuration.
    pub fn new<I, S>(possible: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            possible: possible.into_iter().map(Into::into).collect(),
            default: default.into(),
        }
    }

    /// Returns `true` if `tag` is a recognised language.
    pub fn is_recognized(&self, tag: &str) -> bool {
        self.possible.iter().any(|p| p == tag)
    }
}

/// Splits a raw path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolves raw paths to matched routes.
///
/// The resolver holds no per-request state; the same instance serves every
/// request and identical inputs always produce identical results.
#[derive(Debug, Clone, Default)]
pub struct RouteResolver {
    languages: LanguageConfig,
}

impl RouteResolver {
    /// Creates a resolver with the given language configuration.
    pub fn new(languages: LanguageConfig) -> Self {
        Self { languages }
    }

    /// Returns the language configuration.
    pub fn languages(&self) -> &LanguageConfig {
        &self.languages
    }

    /// Resolves `path` for `method` against the loaded bundles.
    ///
    /// `exists` is the oracle that tells whether a handler identifier is
    /// known. The resolver never fails; an unmatched resolution is returned
    /// when no bundle yields a handler.
    pub fn resolve<B, F>(&self, path: &str, method: &str, bundles: &B, exists: F) -> Resolution
    where
        B: BundleRegistry + ?Sized,
        F: Fn(&str) -> bool,
    {
        let span = span!(Level::DEBUG, "resolve", path = %path, method = %method);
        let _enter = span.enter();

        let method_token = method_token(method);
        let mut raw = split_path(path);

        let language = if raw
            .first()
            .is_some_and(|first| self.languages.is_recognized(first))
        {
            raw.remove(0)
        } else {
            self.languages.default.clone()
        };

        raw.push(DEFAULT_ACTION.to_string());
        let camel: Vec<String> = raw.iter().map(|s| camelize(s)).collect();

        for bundle in candidate_bundles(&camel, bundles) {
            let Some(prefix) = bundles.namespace_prefix(bundle) else {
                continue;
            };
            let namespace = namespace_segments(prefix);

            // The App fallback keeps the first segment as a path segment.
            let skip = if bundle == APP_BUNDLE && camel[0] != APP_BUNDLE {
                0
            } else {
                1
            };

            // Raw segments stay untouched; namespace segments that have no
            // raw counterpart are padded in front so that raw and candidate
            // indices line up.
            let pad = namespace.len().saturating_sub(skip);
            let aligned_raw: Vec<String> = namespace[..pad]
                .iter()
                .map(|s| s.to_string())
                .chain(raw.iter().cloned())
                .collect();

            let initial = Candidate::new(namespace.iter().copied(), camel[skip..].iter().cloned());

            for candidate in initial.backtrack(&method_token) {
                let controller_id = candidate.controller_id();
                trace!(
                    bundle,
                    phase = %candidate.phase(),
                    candidate = %controller_id,
                    "Trying candidate"
                );

                if exists(&controller_id) {
                    let route = MatchedRoute::new(
                        controller_id,
                        candidate.presenter_id(),
                        candidate.action_token(&aligned_raw, &method_token),
                        bundle,
                        candidate.params(&aligned_raw),
                    );
                    debug!(
                        bundle = %route.bundle(),
                        controller = %route.controller_id(),
                        action = %route.action_token(),
                        params = ?route.params(),
                        "Route matched"
                    );
                    return Resolution::new(language, Some(route));
                }
            }

            trace!(bundle, "Bundle yielded no handler");
        }

        debug!("No route matched");
        Resolution::new(language, None)
    }
}

/// Bundles to try, in order: the one named by the first segment, then App.
fn candidate_bundles<'a, B>(camel: &'a [String], bundles: &B) -> Vec<&'a str>
where
    B: BundleRegistry + ?Sized,
{
    let mut out: Vec<&str> = Vec::with_capacity(2);
    for name in [camel[0].as_str(), APP_BUNDLE] {
        if bundles.is_loaded(name) && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
