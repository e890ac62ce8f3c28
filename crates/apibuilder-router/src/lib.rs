//! Route registry and dispatcher for apibuilder_rust.
//!
//! Two tightly coupled components:
//!
//! - [`RouteRegistry`] — insertion-ordered (path, method) → handler
//!   storage with last-write-wins override and a read-only
//!   [`ApiConfig`] export for external tooling.
//! - [`Dispatcher`] — resolves a request descriptor against the
//!   registry, invokes the handler, and normalizes the tri-state
//!   outcome (sync value, sync error, pending future) into exactly one
//!   `(error, value)` completion signal plus a mirroring
//!   [`DispatchFuture`].
//!
//! [`ApiBuilder`] combines both behind one object for the common case.

#![forbid(unsafe_code)]

mod builder;
mod config;
mod dispatch;
mod registry;

pub use builder::ApiBuilder;
pub use config::{ApiConfig, RouteConfig};
pub use dispatch::{DispatchFuture, DispatchResult, Dispatcher};
pub use registry::{Route, RouteRegistry, normalize_path};
