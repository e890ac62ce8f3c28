//! Outcome normalization and the dispatch entry point.
//!
//! [`Dispatcher::dispatch`] resolves a request descriptor against the
//! registry, invokes the handler, and converges all three outcome
//! shapes on one completion signal. Synchronous outcomes (no handler,
//! sync value, sync error) fire the completion before `dispatch`
//! returns; a pending outcome fires it when the returned
//! [`DispatchFuture`] is driven to settlement.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use apibuilder_core::{
    ApiRequest, BoxCompletion, BoxOutcomeFuture, DispatchError, HandlerOutcome,
};
use serde_json::Value;

use crate::registry::RouteRegistry;

/// Dispatches request descriptors against a shared, read-only registry.
///
/// The dispatcher holds the registry by reference: configuration
/// happens first, then any number of independent dispatches borrow it
/// concurrently. It keeps no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r RouteRegistry,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher over a configured registry.
    #[must_use]
    pub fn new(registry: &'r RouteRegistry) -> Self {
        Self { registry }
    }

    /// Dispatches one request descriptor.
    ///
    /// The completion callback fires exactly once per dispatch with the
    /// `(error, value)` signal. The returned future mirrors the same
    /// resolution or rejection for composition with async callers.
    ///
    /// Lookup misses complete synchronously with
    /// [`DispatchError::InvalidRequest`] before this function returns,
    /// as do synchronous handler values and errors. A pending handler
    /// result defers the signal to the returned future, which must be
    /// driven; if the handler's future never settles, the completion is
    /// never called.
    pub fn dispatch<C>(&self, request: &ApiRequest, complete: C) -> DispatchFuture
    where
        C: FnOnce(Option<DispatchError>, Option<Value>) + Send + 'static,
    {
        let path = request.path();
        let method = request.method();

        let Some(handler) = self.registry.resolve(path, method) else {
            let error = DispatchError::invalid_request(path, method);
            complete(Some(error.clone()), None);
            return DispatchFuture::settled(Err(error));
        };

        match handler(request) {
            HandlerOutcome::Value(value) => {
                complete(None, value.clone());
                DispatchFuture::settled(Ok(value))
            }
            HandlerOutcome::Error(error) => {
                let error = DispatchError::Handler(error);
                complete(Some(error.clone()), None);
                DispatchFuture::settled(Err(error))
            }
            HandlerOutcome::Pending(future) => DispatchFuture::pending(future, Box::new(complete)),
        }
    }
}

/// The result a dispatch settles with, mirroring the completion signal.
pub type DispatchResult = Result<Option<Value>, DispatchError>;

enum FutureState {
    /// Outcome already known; completion has fired inside `dispatch`.
    Settled(DispatchResult),
    /// Handler result still pending; completion fires on settlement.
    Pending {
        future: BoxOutcomeFuture,
        complete: BoxCompletion,
    },
    /// Yielded its output; polling again is a caller bug.
    Spent,
}

/// Future returned by [`Dispatcher::dispatch`].
///
/// Resolves in lockstep with the completion callback. For a pending
/// handler outcome this future *is* the continuation: dropping it
/// without driving it means the completion never fires, exactly like a
/// handler future that never settles.
#[must_use = "a pending dispatch never completes unless its future is driven"]
pub struct DispatchFuture {
    state: FutureState,
}

impl DispatchFuture {
    fn settled(result: DispatchResult) -> Self {
        Self {
            state: FutureState::Settled(result),
        }
    }

    fn pending(future: BoxOutcomeFuture, complete: BoxCompletion) -> Self {
        Self {
            state: FutureState::Pending { future, complete },
        }
    }

    /// True once the outcome is known and the completion has fired.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.state, FutureState::Settled(_) | FutureState::Spent)
    }
}

impl std::fmt::Debug for DispatchFuture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            FutureState::Settled(result) => match result {
                Ok(_) => "settled(ok)",
                Err(_) => "settled(err)",
            },
            FutureState::Pending { .. } => "pending",
            FutureState::Spent => "spent",
        };
        f.debug_struct("DispatchFuture").field("state", &state).finish()
    }
}

impl Future for DispatchFuture {
    type Output = DispatchResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, FutureState::Spent) {
            FutureState::Settled(result) => Poll::Ready(result),
            FutureState::Pending {
                mut future,
                complete,
            } => match future.as_mut().poll(cx) {
                Poll::Pending => {
                    this.state = FutureState::Pending { future, complete };
                    Poll::Pending
                }
                Poll::Ready(settled) => {
                    let result = settled.map_err(DispatchError::Handler);
                    match &result {
                        Ok(value) => complete(None, value.clone()),
                        Err(error) => complete(Some(error.clone()), None),
                    }
                    Poll::Ready(result)
                }
            },
            FutureState::Spent => panic!("DispatchFuture polled after completion"),
        }
    }
}
