//! Test support utilities.
//!
//! [`CompletionRecorder`] stands in for the hosting runtime's completion
//! callback in tests: it captures every signal and makes the
//! exactly-once property assertable. [`block_on`] (re-exported from
//! `futures-executor`) drives a dispatch future to completion
//! synchronously.
//!
//! # Example
//!
//! ```
//! use apibuilder_core::testing::CompletionRecorder;
//!
//! let recorder = CompletionRecorder::new();
//! let complete = recorder.callback();
//!
//! complete(None, None);
//! assert!(recorder.single().is_ok());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::completion::CompletionSignal;
use crate::error::DispatchError;

pub use futures_executor::block_on;

/// Records completion signals for assertions.
///
/// Clones share the same underlying record, so a recorder can be kept
/// on the test side while its [`callback`](Self::callback) is handed to
/// the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct CompletionRecorder {
    signals: Arc<Mutex<Vec<CompletionSignal>>>,
}

impl CompletionRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces a completion callback that records into this recorder.
    ///
    /// Each callback is single-shot; take a fresh one per dispatch.
    #[must_use]
    pub fn callback(&self) -> impl FnOnce(Option<DispatchError>, Option<Value>) + Send + 'static {
        let signals = Arc::clone(&self.signals);
        move |error, value| {
            signals.lock().push(CompletionSignal::from_parts(error, value));
        }
    }

    /// Returns the number of signals recorded so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.signals.lock().len()
    }

    /// True if no signal has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }

    /// Returns all recorded signals.
    #[must_use]
    pub fn signals(&self) -> Vec<CompletionSignal> {
        self.signals.lock().clone()
    }

    /// Returns the one recorded signal.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one signal was recorded, making violations
    /// of the exactly-once contract fail loudly in tests.
    #[must_use]
    pub fn single(&self) -> CompletionSignal {
        let signals = self.signals.lock();
        assert_eq!(
            signals.len(),
            1,
            "expected exactly one completion signal, got {}",
            signals.len()
        );
        signals[0].clone()
    }
}
