//! Read-only configuration snapshots.
//!
//! [`ApiConfig`] is the export surface consumed by operators and
//! external tooling (for example to generate an infrastructure
//! description). It lists each normalized path with its registered
//! method names, handlers excluded, and serializes to the shape
//! `{"<path>": {"methods": ["GET", ...]}}` preserving registration
//! order.

use std::fmt;

use apibuilder_core::Method;
use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};

/// The ordered method list exported for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    path: String,
    methods: Vec<Method>,
}

impl RouteConfig {
    /// Creates a snapshot entry.
    #[must_use]
    pub fn new(path: String, methods: Vec<Method>) -> Self {
        Self { path, methods }
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the methods in first-registration order.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// An ordered, handler-free snapshot of a route registry.
///
/// # Example
///
/// ```
/// use apibuilder_core::{HandlerOutcome, Method};
/// use apibuilder_router::RouteRegistry;
///
/// let mut registry = RouteRegistry::new();
/// registry.register(Method::GET, "/echo", |_req| HandlerOutcome::none());
/// registry.register(Method::POST, "/echo", |_req| HandlerOutcome::none());
///
/// let config = registry.export_config();
/// assert_eq!(
///     config.to_json().unwrap(),
///     r#"{"echo":{"methods":["GET","POST"]}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    routes: Vec<RouteConfig>,
}

impl ApiConfig {
    /// Builds a config from snapshot entries.
    #[must_use]
    pub fn from_routes(routes: Vec<RouteConfig>) -> Self {
        Self { routes }
    }

    /// Returns all entries in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Returns the method list for a normalized path.
    #[must_use]
    pub fn methods(&self, path: &str) -> Option<&[Method]> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(RouteConfig::methods)
    }

    /// Returns the number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no path was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Serializes to the canonical JSON object form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, route) in self.routes.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} [", route.path)?;
            for (m_idx, method) in route.methods.iter().enumerate() {
                if m_idx > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{method}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

// Hand-written so the emitted object keeps registration order; a derived
// map type would re-sort the paths.
impl Serialize for ApiConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Methods<'a>(&'a [Method]);

        impl Serialize for Methods<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut state = serializer.serialize_struct("RouteConfig", 1)?;
                state.serialize_field("methods", self.0)?;
                state.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.routes.len()))?;
        for route in &self.routes {
            map.serialize_entry(&route.path, &Methods(&route.methods))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ApiConfig {
        ApiConfig::from_routes(vec![
            RouteConfig::new("echo".into(), vec![Method::GET, Method::POST]),
            RouteConfig::new("items".into(), vec![Method::PUT]),
        ])
    }

    #[test]
    fn exposes_methods_by_path() {
        let config = sample();
        assert_eq!(config.methods("echo").unwrap(), &[Method::GET, Method::POST]);
        assert_eq!(config.methods("items").unwrap(), &[Method::PUT]);
        assert!(config.methods("missing").is_none());
    }

    #[test]
    fn serializes_to_the_export_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "echo": { "methods": ["GET", "POST"] },
                "items": { "methods": ["PUT"] }
            })
        );
    }

    #[test]
    fn json_string_preserves_registration_order() {
        assert_eq!(
            sample().to_json().unwrap(),
            r#"{"echo":{"methods":["GET","POST"]},"items":{"methods":["PUT"]}}"#
        );
    }

    #[test]
    fn empty_config_is_an_empty_object() {
        let config = ApiConfig::default();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
        assert_eq!(config.to_json().unwrap(), "{}");
    }

    #[test]
    fn display_is_operator_friendly() {
        assert_eq!(format!("{}", sample()), "echo [GET POST], items [PUT]");
    }
}
