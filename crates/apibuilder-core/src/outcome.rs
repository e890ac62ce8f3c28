//! Tri-state handler outcome classification.
//!
//! A handler invocation produces one of three shapes, and the dispatcher
//! converges all of them on a single completion signal:
//!
//! - a synchronous value ([`HandlerOutcome::Value`], where `None`
//!   preserves "returned nothing"),
//! - a synchronous failure ([`HandlerOutcome::Error`]),
//! - a pending asynchronous result ([`HandlerOutcome::Pending`]) that
//!   the dispatcher attaches its single continuation to.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::HandlerError;
use crate::request::ApiRequest;

/// Boxed future for a handler result that is not yet available.
pub type BoxOutcomeFuture =
    Pin<Box<dyn Future<Output = Result<Option<Value>, HandlerError>> + Send + 'static>>;

/// A registered handler: a unary function over the request descriptor.
pub type BoxHandler = Box<dyn Fn(&ApiRequest) -> HandlerOutcome + Send + Sync + 'static>;

/// The outcome of invoking a handler.
pub enum HandlerOutcome {
    /// Synchronously returned value; `None` means "no value", which is
    /// preserved as-is in the completion signal.
    Value(Option<Value>),
    /// Synchronous failure.
    Error(HandlerError),
    /// A result that settles later. The completion signal must not fire
    /// until it does.
    Pending(BoxOutcomeFuture),
}

impl HandlerOutcome {
    /// A synchronous value outcome.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(Some(value.into()))
    }

    /// A synchronous "no value" outcome.
    #[must_use]
    pub fn none() -> Self {
        Self::Value(None)
    }

    /// A synchronous failure outcome.
    #[must_use]
    pub fn error(error: impl Into<HandlerError>) -> Self {
        Self::Error(error.into())
    }

    /// A pending outcome from any compatible future.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<Option<Value>, HandlerError>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }
}

impl fmt::Debug for HandlerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Error(error) => f.debug_tuple("Error").field(error).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

impl From<Value> for HandlerOutcome {
    fn from(value: Value) -> Self {
        Self::Value(Some(value))
    }
}

impl From<Option<Value>> for HandlerOutcome {
    fn from(value: Option<Value>) -> Self {
        Self::Value(value)
    }
}

/// Handlers that return nothing complete with "no value".
impl From<()> for HandlerOutcome {
    fn from((): ()) -> Self {
        Self::Value(None)
    }
}

impl From<HandlerError> for HandlerOutcome {
    fn from(error: HandlerError) -> Self {
        Self::Error(error)
    }
}

impl<E: Into<HandlerError>> From<Result<Value, E>> for HandlerOutcome {
    fn from(result: Result<Value, E>) -> Self {
        match result {
            Ok(value) => Self::Value(Some(value)),
            Err(error) => Self::Error(error.into()),
        }
    }
}

impl<E: Into<HandlerError>> From<Result<Option<Value>, E>> for HandlerOutcome {
    fn from(result: Result<Option<Value>, E>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_constructors() {
        assert!(matches!(
            HandlerOutcome::value(json!({ "hi": "there" })),
            HandlerOutcome::Value(Some(_))
        ));
        assert!(matches!(HandlerOutcome::none(), HandlerOutcome::Value(None)));
    }

    #[test]
    fn unit_converts_to_no_value() {
        assert!(matches!(
            HandlerOutcome::from(()),
            HandlerOutcome::Value(None)
        ));
    }

    #[test]
    fn results_classify_by_variant() {
        let ok: Result<Value, HandlerError> = Ok(json!(1));
        assert!(matches!(
            HandlerOutcome::from(ok),
            HandlerOutcome::Value(Some(_))
        ));

        let err: Result<Value, HandlerError> = Err(HandlerError::from("boom"));
        assert!(matches!(
            HandlerOutcome::from(err),
            HandlerOutcome::Error(_)
        ));
    }

    #[test]
    fn pending_wraps_a_future() {
        let outcome = HandlerOutcome::pending(async { Ok(Some(json!(1))) });
        assert!(matches!(outcome, HandlerOutcome::Pending(_)));
        assert_eq!(format!("{outcome:?}"), "Pending(..)");
    }
}
