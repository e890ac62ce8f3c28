//! Dispatch error taxonomy.
//!
//! Two failure shapes exist, and both surface exactly once through the
//! completion signal's error slot:
//!
//! - [`DispatchError::InvalidRequest`] — no route/method match, always
//!   delivered synchronously, never retried.
//! - [`DispatchError::Handler`] — a handler failure, forwarded verbatim
//!   as the payload the handler produced.

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::method::Method;

/// A failure payload produced by a handler.
///
/// The payload is carried verbatim: a handler that fails with a plain
/// string, a structured object, or any other JSON value sees exactly
/// that value forwarded to the completion signal, never wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerError(Value);

impl HandlerError {
    /// Creates an error from any JSON payload.
    #[must_use]
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(payload.into())
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.0
    }

    /// Consumes the error, returning the payload.
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.0
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // String payloads render bare, everything else as JSON.
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<Value> for HandlerError {
    fn from(payload: Value) -> Self {
        Self(payload)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self(Value::String(message.to_owned()))
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self(Value::String(message))
    }
}

impl Serialize for HandlerError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Error delivered through a completion signal.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// No route/method match for the incoming request.
    InvalidRequest {
        /// Diagnostic naming the unnormalized path and the method.
        message: String,
    },
    /// A handler failure, forwarded verbatim.
    Handler(HandlerError),
}

impl DispatchError {
    /// Creates the not-found error for a (path, method) pair.
    ///
    /// The path is interpolated exactly as received, including any
    /// leading slash, for compatibility with existing tooling.
    #[must_use]
    pub fn invalid_request(path: &str, method: &Method) -> Self {
        Self::InvalidRequest {
            message: format!("no handler for {path}:{method}"),
        }
    }

    /// Returns true for the no-route-match variant.
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Returns the forwarded handler error, if that is what this is.
    #[must_use]
    pub fn as_handler(&self) -> Option<&HandlerError> {
        match self {
            Self::Handler(error) => Some(error),
            Self::InvalidRequest { .. } => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { message } => f.write_str(message),
            Self::Handler(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handler(error) => Some(error),
            Self::InvalidRequest { .. } => None,
        }
    }
}

impl From<HandlerError> for DispatchError {
    fn from(error: HandlerError) -> Self {
        Self::Handler(error)
    }
}

impl Serialize for DispatchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::InvalidRequest { message } => {
                let mut state = serializer.serialize_struct("DispatchError", 2)?;
                state.serialize_field("type", "InvalidRequest")?;
                state.serialize_field("message", message)?;
                state.end()
            }
            // Handler failures serialize as their verbatim payload.
            Self::Handler(error) => error.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_request_message_uses_unnormalized_path() {
        let error = DispatchError::invalid_request("/no", &Method::GET);
        assert_eq!(format!("{error}"), "no handler for /no:GET");
    }

    #[test]
    fn invalid_request_serializes_with_type_tag() {
        let error = DispatchError::invalid_request("/no", &Method::GET);
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({ "type": "InvalidRequest", "message": "no handler for /no:GET" })
        );
    }

    #[test]
    fn handler_error_payload_is_forwarded_verbatim() {
        let error = DispatchError::from(HandlerError::new(json!({ "code": 42 })));
        assert_eq!(serde_json::to_value(&error).unwrap(), json!({ "code": 42 }));
    }

    #[test]
    fn handler_error_display_renders_strings_bare() {
        assert_eq!(format!("{}", HandlerError::from("boom")), "boom");
        assert_eq!(
            format!("{}", HandlerError::new(json!({ "code": 1 }))),
            "{\"code\":1}"
        );
    }

    #[test]
    fn taxonomy_accessors() {
        let not_found = DispatchError::invalid_request("/x", &Method::PUT);
        assert!(not_found.is_invalid_request());
        assert!(not_found.as_handler().is_none());

        let failed = DispatchError::Handler(HandlerError::from("nope"));
        assert!(!failed.is_invalid_request());
        assert_eq!(
            failed.as_handler().map(HandlerError::payload),
            Some(&json!("nope"))
        );
    }
}
