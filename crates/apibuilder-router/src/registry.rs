//! Insertion-ordered route storage.
//!
//! The registry maps a normalized path to its [`Route`], and each route
//! maps method keys to handlers. Export order is an observable
//! contract, so storage is `Vec`-backed rather than hashed: paths keep
//! first-seen order and each route's method list keeps
//! first-registration order, with re-registration replacing the handler
//! in place.

use std::fmt;

use apibuilder_core::{ApiRequest, BoxHandler, HandlerOutcome, Method};

use crate::config::{ApiConfig, RouteConfig};

/// Strips encapsulating slashes, the registry's storage key form.
///
/// `/echo` and `/echo/` both normalize to `echo`; interior slashes are
/// preserved (`/v1/items` becomes `v1/items`).
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// One registered path with its ordered method bindings.
pub struct Route {
    path: String,
    bindings: Vec<(Method, BoxHandler)>,
}

impl Route {
    fn new(path: String) -> Self {
        Self {
            path,
            bindings: Vec::new(),
        }
    }

    /// Binds a method to a handler. A method already present keeps its
    /// position; only its handler is replaced.
    fn bind(&mut self, method: Method, handler: BoxHandler) {
        match self.bindings.iter_mut().find(|(m, _)| *m == method) {
            Some((_, existing)) => *existing = handler,
            None => self.bindings.push((method, handler)),
        }
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Iterates methods in first-registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.bindings.iter().map(|(method, _)| method)
    }

    /// Returns the handler bound to a method.
    #[must_use]
    pub fn handler(&self, method: &Method) -> Option<&BoxHandler> {
        self.bindings
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, handler)| handler)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("methods", &self.methods().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Mapping from normalized path to [`Route`], in first-seen order.
///
/// Created empty, mutated only by registration, never removed from.
/// After the configuration phase it is shared immutably with the
/// dispatcher.
///
/// # Example
///
/// ```
/// use apibuilder_core::{HandlerOutcome, Method};
/// use apibuilder_router::RouteRegistry;
///
/// let mut registry = RouteRegistry::new();
/// registry.register(Method::GET, "/echo", |_req| HandlerOutcome::none());
///
/// assert!(registry.resolve("/echo", &Method::GET).is_some());
/// assert!(registry.resolve("/echo", &Method::POST).is_none());
/// ```
#[derive(Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a (method, path) pair.
    ///
    /// The path is normalized by stripping encapsulating slashes. The
    /// route is created on first sight; registering an existing
    /// (path, method) pair replaces the prior handler in place without
    /// touching other methods on the path. Always succeeds.
    pub fn register<H, O>(&mut self, method: Method, path: &str, handler: H)
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        let boxed: BoxHandler = Box::new(move |request| handler(request).into());
        let normalized = normalize_path(path);
        match self.routes.iter_mut().find(|route| route.path == normalized) {
            Some(route) => route.bind(method, boxed),
            None => {
                let mut route = Route::new(normalized.to_owned());
                route.bind(method, boxed);
                self.routes.push(route);
            }
        }
    }

    /// Returns the handler for the exact (normalized path, method)
    /// pair, or `None` when the path or the method is unknown.
    #[must_use]
    pub fn resolve(&self, path: &str, method: &Method) -> Option<&BoxHandler> {
        let normalized = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.path == normalized)?
            .handler(method)
    }

    /// Produces a read-only snapshot of paths and their method lists,
    /// handlers excluded, in registration order.
    #[must_use]
    pub fn export_config(&self) -> ApiConfig {
        ApiConfig::from_routes(
            self.routes
                .iter()
                .map(|route| {
                    RouteConfig::new(route.path.clone(), route.methods().cloned().collect())
                })
                .collect(),
        )
    }

    /// Iterates routes in first-seen order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Returns the number of registered paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no path has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apibuilder_core::testing::CompletionRecorder;
    use apibuilder_core::{ApiRequest, HandlerOutcome};
    use serde_json::json;

    fn invoke(handler: &BoxHandler, request: &ApiRequest) -> HandlerOutcome {
        handler(request)
    }

    #[test]
    fn normalize_strips_encapsulating_slashes() {
        assert_eq!(normalize_path("/echo"), "echo");
        assert_eq!(normalize_path("echo/"), "echo");
        assert_eq!(normalize_path("/echo/"), "echo");
        assert_eq!(normalize_path("/v1/items"), "v1/items");
        assert_eq!(normalize_path("/"), "");
    }

    #[test]
    fn registered_handler_resolves() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/echo", |_req| {
            HandlerOutcome::value(json!("hi"))
        });

        let handler = registry.resolve("/echo", &Method::GET).unwrap();
        let request = ApiRequest::new(Method::GET, "/echo");
        assert!(matches!(
            invoke(handler, &request),
            HandlerOutcome::Value(Some(_))
        ));
    }

    #[test]
    fn resolve_normalizes_its_input() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "echo/", |_req| HandlerOutcome::none());

        assert!(registry.resolve("/echo", &Method::GET).is_some());
        assert!(registry.resolve("/echo/", &Method::GET).is_some());
        assert!(registry.resolve("echo", &Method::GET).is_some());
    }

    #[test]
    fn unknown_path_or_method_is_none() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/echo", |_req| HandlerOutcome::none());

        assert!(registry.resolve("/missing", &Method::GET).is_none());
        assert!(registry.resolve("/echo", &Method::POST).is_none());
    }

    #[test]
    fn re_registration_replaces_handler_in_place() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/echo", |_req| {
            HandlerOutcome::value(json!("first"))
        });
        registry.register(Method::POST, "/echo", |_req| HandlerOutcome::none());
        registry.register(Method::GET, "/echo", |_req| {
            HandlerOutcome::value(json!("second"))
        });

        // Method list order is untouched by the override.
        let config = registry.export_config();
        assert_eq!(
            config.methods("echo").unwrap(),
            &[Method::GET, Method::POST]
        );

        // Only the second handler remains bound.
        let handler = registry.resolve("/echo", &Method::GET).unwrap();
        let request = ApiRequest::new(Method::GET, "/echo");
        match invoke(handler, &request) {
            HandlerOutcome::Value(Some(value)) => assert_eq!(value, json!("second")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn export_preserves_first_seen_path_order() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/b", |_req| HandlerOutcome::none());
        registry.register(Method::GET, "/a", |_req| HandlerOutcome::none());
        registry.register(Method::POST, "/b", |_req| HandlerOutcome::none());

        let paths: Vec<_> = registry
            .export_config()
            .routes()
            .iter()
            .map(|route| route.path().to_owned())
            .collect();
        assert_eq!(paths, ["b", "a"]);
    }

    #[test]
    fn registry_is_append_only_and_debuggable() {
        let mut registry = RouteRegistry::new();
        assert!(registry.is_empty());
        registry.register(Method::GET, "/echo", |_req| HandlerOutcome::none());
        assert_eq!(registry.len(), 1);
        let debug = format!("{registry:?}");
        assert!(debug.contains("echo"));
    }

    // ========================================================================
    // Order invariants over arbitrary registration sequences
    // ========================================================================

    mod order_properties {
        use super::*;
        use proptest::prelude::*;

        const PATHS: [&str; 3] = ["/echo", "/items", "/users/list"];
        const METHODS: [Method; 4] =
            [Method::GET, Method::POST, Method::PUT, Method::DELETE];

        proptest! {
            #[test]
            fn export_order_is_first_seen_and_duplicate_free(
                registrations in proptest::collection::vec((0usize..3, 0usize..4), 0..24)
            ) {
                let mut registry = RouteRegistry::new();
                let mut expected: Vec<(String, Vec<Method>)> = Vec::new();

                for (path_idx, method_idx) in registrations {
                    let path = PATHS[path_idx];
                    let method = METHODS[method_idx].clone();
                    registry.register(method.clone(), path, |_req| HandlerOutcome::none());

                    let key = normalize_path(path).to_owned();
                    match expected.iter_mut().find(|(p, _)| *p == key) {
                        Some((_, methods)) => {
                            if !methods.contains(&method) {
                                methods.push(method);
                            }
                        }
                        None => expected.push((key, vec![method])),
                    }
                }

                let config = registry.export_config();
                let exported: Vec<(String, Vec<Method>)> = config
                    .routes()
                    .iter()
                    .map(|route| (route.path().to_owned(), route.methods().to_vec()))
                    .collect();
                prop_assert_eq!(exported, expected);
            }
        }
    }

    // ========================================================================
    // Recorder interplay (handlers are plain closures over test state)
    // ========================================================================

    #[test]
    fn handler_sees_the_full_descriptor() {
        let recorder = CompletionRecorder::new();
        let seen = recorder.clone();
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/echo", move |request: &ApiRequest| {
            assert_eq!(request.query_string["a"], "b");
            (seen.callback())(None, None);
            HandlerOutcome::none()
        });

        let request = ApiRequest::new(Method::GET, "/echo").with_query("a", "b");
        let handler = registry.resolve("/echo", &Method::GET).unwrap();
        let _ = handler(&request);
        assert_eq!(recorder.call_count(), 1);
    }
}
