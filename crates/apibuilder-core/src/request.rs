//! Request descriptor types.
//!
//! A [`ApiRequest`] is an already-parsed request handed over by the
//! hosting runtime. The router only ever reads the nested
//! [`CallContext`] (path and method) for lookup; the query string and
//! every other field pass through to the selected handler untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::method::Method;

/// The fixed nested routing context of a request descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallContext {
    /// Request path exactly as received, e.g. `/echo`.
    pub path: String,
    /// Request method key.
    pub method: Method,
}

/// An already-parsed request descriptor.
///
/// Only `context.path` and `context.method` are interpreted by the
/// router. `query_string` and the flattened `extra` fields are carried
/// along verbatim for the handler.
///
/// # Example
///
/// ```
/// use apibuilder_core::{ApiRequest, Method};
///
/// let request = ApiRequest::new(Method::GET, "/echo")
///     .with_query("a", "b");
///
/// assert_eq!(request.path(), "/echo");
/// assert_eq!(request.method(), &Method::GET);
/// assert_eq!(request.query_string["a"], "b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Routing context used for handler lookup.
    pub context: CallContext,
    /// Parsed query parameters, never interpreted by the router.
    #[serde(
        rename = "queryString",
        default,
        skip_serializing_if = "Map::is_empty"
    )]
    pub query_string: Map<String, Value>,
    /// Arbitrary pass-through fields supplied by the hosting runtime.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiRequest {
    /// Creates a descriptor with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            context: CallContext {
                path: path.into(),
                method,
            },
            query_string: Map::new(),
            extra: Map::new(),
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_string.insert(key.into(), value.into());
        self
    }

    /// Adds a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the path exactly as received.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.context.path
    }

    /// Returns the method key.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.context.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_populates_context() {
        let request = ApiRequest::new(Method::POST, "/items");
        assert_eq!(request.path(), "/items");
        assert_eq!(request.method(), &Method::POST);
        assert!(request.query_string.is_empty());
        assert!(request.extra.is_empty());
    }

    #[test]
    fn deserializes_nested_context_shape() {
        let request: ApiRequest = serde_json::from_value(json!({
            "context": { "path": "/echo", "method": "GET" },
            "queryString": { "a": "b" },
            "body": { "hi": "there" }
        }))
        .unwrap();

        assert_eq!(request.path(), "/echo");
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.query_string["a"], "b");
        assert_eq!(request.extra["body"], json!({ "hi": "there" }));
    }

    #[test]
    fn serializes_pass_through_fields_at_top_level() {
        let request = ApiRequest::new(Method::GET, "/echo").with_field("stage", "prod");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["context"]["path"], "/echo");
        assert_eq!(value["stage"], "prod");
        // Empty query string is omitted entirely.
        assert!(value.get("queryString").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let request = ApiRequest::new(Method::new("purge"), "/cache/")
            .with_query("scope", "all")
            .with_field("requestId", 42);

        let text = serde_json::to_string(&request).unwrap();
        let back: ApiRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, request);
    }
}
