//! Completion-callback contract.
//!
//! Every dispatch produces exactly one terminal `(error, value)` signal
//! through a callback supplied by the hosting runtime. The callback is
//! an `FnOnce`, so firing it twice is unrepresentable.

use std::fmt;

use serde_json::Value;

use crate::error::DispatchError;

/// A boxed completion callback.
///
/// The two slots mirror the hosting runtime's `(error, value)`
/// convention: a failed dispatch carries `(Some(error), None)`, a
/// successful one `(None, value)` where the value slot preserves "no
/// value" as `None`.
pub type BoxCompletion = Box<dyn FnOnce(Option<DispatchError>, Option<Value>) + Send + 'static>;

/// A captured completion signal.
///
/// This is the value-level record of one callback invocation, used by
/// the testing recorder and anywhere a signal needs to be stored or
/// compared rather than delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSignal {
    error: Option<DispatchError>,
    value: Option<Value>,
}

impl CompletionSignal {
    /// A successful signal carrying an optional value.
    #[must_use]
    pub fn ok(value: Option<Value>) -> Self {
        Self { error: None, value }
    }

    /// A failed signal.
    #[must_use]
    pub fn err(error: DispatchError) -> Self {
        Self {
            error: Some(error),
            value: None,
        }
    }

    /// Builds a signal from the raw callback arguments.
    #[must_use]
    pub fn from_parts(error: Option<DispatchError>, value: Option<Value>) -> Self {
        Self { error, value }
    }

    /// Returns the error slot.
    #[must_use]
    pub fn error(&self) -> Option<&DispatchError> {
        self.error.as_ref()
    }

    /// Returns the value slot.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// True when the error slot is empty.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.value) {
            (Some(error), _) => write!(f, "error: {error}"),
            (None, Some(value)) => write!(f, "ok: {value}"),
            (None, None) => f.write_str("ok: <no value>"),
        }
    }
}
