//! ApiBuilder: the configuration-phase surface.
//!
//! [`ApiBuilder`] owns a [`RouteRegistry`], exposes per-verb
//! registration in builder style, and hands dispatches to a
//! [`Dispatcher`] borrowing that registry. It is a convenience facade;
//! the registry and dispatcher remain usable as explicit separate
//! objects.
//!
//! # Example
//!
//! ```
//! use apibuilder_core::testing::{CompletionRecorder, block_on};
//! use apibuilder_core::{ApiRequest, HandlerOutcome, Method};
//! use apibuilder_router::ApiBuilder;
//! use serde_json::json;
//!
//! let api = ApiBuilder::new()
//!     .get("/echo", |_req| HandlerOutcome::value(json!({ "hi": "there" })))
//!     .post("/echo", |_req| HandlerOutcome::none());
//!
//! assert_eq!(
//!     api.api_config().to_json().unwrap(),
//!     r#"{"echo":{"methods":["GET","POST"]}}"#
//! );
//!
//! let recorder = CompletionRecorder::new();
//! let request = ApiRequest::new(Method::GET, "/echo");
//! let result = block_on(api.dispatch(&request, recorder.callback()));
//! assert_eq!(result, Ok(Some(json!({ "hi": "there" }))));
//! assert!(recorder.single().is_ok());
//! ```

use apibuilder_core::{ApiRequest, DispatchError, HandlerOutcome, Method};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::dispatch::{DispatchFuture, Dispatcher};
use crate::registry::RouteRegistry;

/// Route registration and dispatch behind one object.
#[derive(Debug, Default)]
pub struct ApiBuilder {
    registry: RouteRegistry,
}

impl ApiBuilder {
    /// Creates a builder with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for any method key.
    #[must_use]
    pub fn route<H, O>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.registry.register(method, path, handler);
        self
    }

    /// Registers a GET handler.
    #[must_use]
    pub fn get<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::GET, path, handler)
    }

    /// Registers a POST handler.
    #[must_use]
    pub fn post<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::POST, path, handler)
    }

    /// Registers a PUT handler.
    #[must_use]
    pub fn put<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::PUT, path, handler)
    }

    /// Registers a DELETE handler.
    #[must_use]
    pub fn delete<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::DELETE, path, handler)
    }

    /// Registers a PATCH handler.
    #[must_use]
    pub fn patch<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::PATCH, path, handler)
    }

    /// Registers an OPTIONS handler.
    #[must_use]
    pub fn options<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::OPTIONS, path, handler)
    }

    /// Registers a HEAD handler.
    #[must_use]
    pub fn head<H, O>(self, path: &str, handler: H) -> Self
    where
        H: Fn(&ApiRequest) -> O + Send + Sync + 'static,
        O: Into<HandlerOutcome>,
    {
        self.route(Method::HEAD, path, handler)
    }

    /// Exports the read-only configuration snapshot.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        self.registry.export_config()
    }

    /// Returns the underlying registry, e.g. to hand to a standalone
    /// [`Dispatcher`].
    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Dispatches one request descriptor. See [`Dispatcher::dispatch`].
    pub fn dispatch<C>(&self, request: &ApiRequest, complete: C) -> DispatchFuture
    where
        C: FnOnce(Option<DispatchError>, Option<Value>) + Send + 'static,
    {
        Dispatcher::new(&self.registry).dispatch(request, complete)
    }
}
