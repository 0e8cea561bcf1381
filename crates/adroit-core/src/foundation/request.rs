//! Inbound request value.
//!
//! A [`Request`] is the minimal view of an HTTP (or CLI) request that the
//! router and dispatcher need: the method, the raw path and a handful of
//! optional extras. Building it from a real HTTP stack is left to the host.

use std::collections::BTreeMap;

use serde_json::Value;

/// Method string used for requests that come from the command line.
pub const CLI_METHOD: &str = "cli";

/// An immutable inbound request.
///
/// # Example
///
/// ```rust
/// use adroit_core::Request;
///
/// let req = Request::new("GET", "/blog/post/42?draft=1").with_header("Accept", "text/html");
/// assert_eq!(req.path(), "/blog/post/42");
/// assert_eq!(req.query("draft"), Some("1"));
/// assert_eq!(req.header("accept"), Some("text/html"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: String,
    path: String,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    attributes: BTreeMap<String, Value>,
}

impl Request {
    /// Creates a request from a method and a raw URI.
    ///
    /// Anything after the first `?` is parsed as a query string and removed
    /// from the path.
    pub fn new(method: impl Into<String>, uri: impl AsRef<str>) -> Self {
        let uri = uri.as_ref();
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (uri, BTreeMap::new()),
        };

        Self {
            method: method.into(),
            path: path.to_string(),
            query,
            headers: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a request for a command-line invocation.
    pub fn cli(path: impl AsRef<str>) -> Self {
        Self::new(CLI_METHOD, path)
    }

    /// Adds a header. Header names are matched case-insensitively.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Attaches an arbitrary attribute (e.g. an authenticated user id).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the request method as given (`"GET"`, `"cli"`, ...).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns `true` if this request came from the command line.
    pub fn is_cli(&self) -> bool {
        self.method.eq_ignore_ascii_case(CLI_METHOD)
    }

    /// Returns the raw path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Looks up a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Looks up an attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_split_from_path() {
        let req = Request::new("GET", "/a/b?x=1&flag&&y=");
        assert_eq!(req.path(), "/a/b");
        assert_eq!(req.query("x"), Some("1"));
        assert_eq!(req.query("flag"), Some(""));
        assert_eq!(req.query("y"), Some(""));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn test_cli_request() {
        let req = Request::cli("/cache/clear");
        assert_eq!(req.method(), "cli");
        assert!(req.is_cli());
        assert!(!Request::new("GET", "/").is_cli());
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = Request::new("POST", "/").with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_attributes() {
        let req = Request::new("GET", "/").with_attribute("user", 7);
        assert_eq!(req.attribute("user"), Some(&Value::from(7)));
        assert!(req.attribute("other").is_none());
    }
}
