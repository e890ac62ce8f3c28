//! Core types for the apibuilder_rust request router.
//!
//! This crate provides the fundamental building blocks:
//! - [`ApiRequest`] and [`CallContext`] request descriptor types
//! - [`Method`] opaque uppercase method keys
//! - [`HandlerOutcome`] tri-state outcome classification
//! - [`DispatchError`] / [`HandlerError`] taxonomy and the completion
//!   contract ([`BoxCompletion`], [`CompletionSignal`])
//!
//! # Design Principles
//!
//! - The router never interprets descriptor fields beyond path/method
//! - Errors are forwarded verbatim, never wrapped or logged
//! - Exactly one completion signal per dispatch, enforced structurally
//! - All types support `Send + Sync` where handlers cross threads

#![forbid(unsafe_code)]

mod completion;
mod error;
mod method;
mod outcome;
mod request;
pub mod testing;

pub use completion::{BoxCompletion, CompletionSignal};
pub use error::{DispatchError, HandlerError};
pub use method::Method;
pub use outcome::{BoxHandler, BoxOutcomeFuture, HandlerOutcome};
pub use request::{ApiRequest, CallContext};

// Re-export testing utilities
pub use testing::{CompletionRecorder, block_on};
