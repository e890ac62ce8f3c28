//! Request router with a single `(error, value)` completion contract.
//!
//! apibuilder_rust maps an already-parsed request descriptor to a
//! registered handler and normalizes the handler's outcome —
//! synchronous value, synchronous error, or pending asynchronous
//! result — into exactly one completion signal:
//!
//! - **Ordered route registry** — per-verb registration with
//!   last-write-wins override and an exportable config snapshot
//! - **Tri-state outcome normalization** — one completion callback and
//!   a mirroring future per dispatch, no retries, no logging
//! - **Opaque descriptors** — query strings and pass-through fields are
//!   never interpreted, only forwarded to the handler
//!
//! This is not an HTTP server: there is no listening socket, no
//! connection handling and no header parsing. The hosting runtime
//! supplies the descriptor and the completion callback.
//!
//! # Quick Start
//!
//! ```
//! use apibuilder_rust::prelude::*;
//! use serde_json::json;
//!
//! let api = ApiBuilder::new()
//!     .get("/echo", |req: &ApiRequest| {
//!         HandlerOutcome::value(json!({ "query": req.query_string.clone() }))
//!     });
//!
//! let request = ApiRequest::new(Method::GET, "/echo").with_query("a", "b");
//! let future = api.dispatch(&request, |error, value| {
//!     assert!(error.is_none());
//!     assert_eq!(value, Some(json!({ "query": { "a": "b" } })));
//! });
//! # let _ = apibuilder_rust::testing::block_on(future);
//! ```
//!
//! # Crate Structure
//!
//! - [`apibuilder_core`] — descriptor, outcome, and error types
//! - [`apibuilder_router`] — route registry and dispatcher

#![forbid(unsafe_code)]

// Re-export crates
pub use apibuilder_core as core;
pub use apibuilder_router as router;

// Re-export commonly used types
pub use apibuilder_core::{
    ApiRequest, BoxCompletion, BoxHandler, BoxOutcomeFuture, CallContext, CompletionSignal,
    DispatchError, HandlerError, HandlerOutcome, Method,
};
pub use apibuilder_router::{
    ApiBuilder, ApiConfig, DispatchFuture, DispatchResult, Dispatcher, Route, RouteConfig,
    RouteRegistry, normalize_path,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiBuilder, ApiConfig, ApiRequest, CallContext, DispatchError, DispatchFuture,
        Dispatcher, HandlerError, HandlerOutcome, Method, RouteRegistry,
    };
    pub use serde::{Deserialize, Serialize};
}

/// Testing utilities module.
pub mod testing {
    pub use apibuilder_core::testing::{CompletionRecorder, block_on};
}

/// Extension trait for rendering an API's exported configuration.
pub trait ApiConfigExt {
    /// Exports the configuration snapshot as its canonical JSON string,
    /// `{"<path>": {"methods": [...]}}` in registration order.
    ///
    /// # Errors
    ///
    /// Returns any serialization error from `serde_json`.
    ///
    /// # Example
    ///
    /// ```
    /// use apibuilder_rust::prelude::*;
    /// use apibuilder_rust::ApiConfigExt;
    ///
    /// let api = ApiBuilder::new().get("/echo", |_req| HandlerOutcome::none());
    /// assert_eq!(api.config_json().unwrap(), r#"{"echo":{"methods":["GET"]}}"#);
    /// ```
    fn config_json(&self) -> serde_json::Result<String>;

    /// Exports the configuration snapshot as a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Returns any serialization error from `serde_json`.
    fn config_value(&self) -> serde_json::Result<serde_json::Value>;
}

impl ApiConfigExt for ApiBuilder {
    fn config_json(&self) -> serde_json::Result<String> {
        self.api_config().to_json()
    }

    fn config_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.api_config())
    }
}

impl ApiConfigExt for RouteRegistry {
    fn config_json(&self) -> serde_json::Result<String> {
        self.export_config().to_json()
    }

    fn config_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.export_config())
    }
}
