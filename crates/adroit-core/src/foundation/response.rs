//! Outbound response value.

use std::collections::BTreeMap;

use serde::Serialize;

/// A response produced by an action, a responder or an event listener.
///
/// The dispatcher only ever checks whether a value *is* a `Response`; the
/// fields are for the host that eventually sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

impl Response {
    /// An empty `200 OK` response.
    pub fn ok() -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// A `text/plain` response.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body(body)
    }

    /// A JSON response.
    ///
    /// Values that fail to serialize produce a `500` with the serializer's
    /// message as body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::ok()
                .with_header("content-type", "application/json")
                .with_body(body),
            Err(e) => Self::text(e.to_string()).with_status(500),
        }
    }

    /// An empty `404 Not Found` response.
    pub fn not_found() -> Self {
        Self::text("Not Found").with_status(404)
    }

    /// Replaces the status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets a header, replacing an existing one with the same name.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a header in place.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Iterates over all headers.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
