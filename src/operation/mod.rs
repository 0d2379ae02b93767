//! Async-operation state machine.
//!
//! [`AsyncOperation`] is the facade UI code drives: it wraps a
//! caller-supplied async function, walks the `idle → loading →
//! (success | error)` lifecycle, reports failures through the
//! [`ErrorReporter`], and fires optional success/error hooks once per
//! execution. State only ever holds the user-facing message; the raw
//! classified error is returned to the caller for inspection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::report::ErrorReporter;

type SuccessHook<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Observable lifecycle of one async action.
///
/// Invariant: at most one of `is_loading`, `is_success`, and
/// `error.is_some()` is true at any time. All four fields false/absent is
/// the idle state.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_success: bool,
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> OperationState<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            is_success: false,
        }
    }

    fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::idle()
        }
    }

    fn success(data: T) -> Self {
        Self {
            data: Some(data),
            is_success: true,
            ..Self::idle()
        }
    }

    fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::idle()
        }
    }
}

/// State-machine wrapper around caller-supplied async operations.
pub struct AsyncOperation<T> {
    state: Mutex<OperationState<T>>,
    // Monotonic call token; completions from superseded calls are ignored.
    epoch: AtomicU64,
    reporter: Arc<ErrorReporter>,
    context: String,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<T: Clone> AsyncOperation<T> {
    /// New controller in the idle state. `context` labels error reports.
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(OperationState::idle()),
            epoch: AtomicU64::new(0),
            reporter: Arc::new(ErrorReporter::new()),
            context: context.into(),
            on_success: None,
            on_error: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Hook invoked with the resolved value, once per successful execute.
    pub fn with_on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Hook invoked with the user-facing message, once per failed execute.
    pub fn with_on_error(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> OperationState<T> {
        self.lock_state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    pub fn is_success(&self) -> bool {
        self.lock_state().is_success
    }

    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock_state().data.clone()
    }

    /// Run an async operation through the state machine.
    ///
    /// The state moves to loading immediately, discarding prior data or
    /// error. On settlement the state moves to success or error and the
    /// matching hook fires — unless a newer `execute`, `reset`, or
    /// `set_error` has superseded this call, in which case the newer state
    /// is left untouched. The returned result always reflects this call's
    /// own outcome, with the raw error propagated for inspection.
    pub async fn execute<F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock_state();
            // Re-check under the lock: on a multithreaded runtime a newer
            // call can settle between the token grab and this write, and
            // its state must not be clobbered with a stale `loading`.
            if self.is_current(token) {
                *state = OperationState::loading();
            }
        }

        match operation().await {
            Ok(value) => {
                if self.is_current(token) {
                    *self.lock_state() = OperationState::success(value.clone());
                    if let Some(hook) = &self.on_success {
                        hook(&value);
                    }
                }
                Ok(value)
            }
            Err(error) => {
                // Bursts of identical failures are absorbed by the
                // reporter's cooldown, so stale completions report too.
                self.reporter.report(&error, Some(&self.context));
                if self.is_current(token) {
                    let message = error.message().to_string();
                    *self.lock_state() = OperationState::failed(message.clone());
                    if let Some(hook) = &self.on_error {
                        hook(&message);
                    }
                }
                Err(error)
            }
        }
    }

    /// Return to idle. In-flight executes become stale and will not
    /// overwrite the reset state.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.lock_state() = OperationState::idle();
    }

    /// Move straight to the error state without running an operation.
    /// Used for synchronous/local validation failures.
    pub fn set_error(&self, message: impl Into<String>) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.lock_state() = OperationState::failed(message.into());
    }

    fn is_current(&self, token: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == token
    }

    fn lock_state(&self) -> MutexGuard<'_, OperationState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> std::fmt::Debug for AsyncOperation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncOperation")
            .field("context", &self.context)
            .field("epoch", &self.epoch.load(Ordering::SeqCst))
            .finish()
    }
}
