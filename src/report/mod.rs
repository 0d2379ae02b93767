//! Deduplicated error reporting.
//!
//! The reporter forwards classified errors to a pluggable sink, suppressing
//! repeats of the same `(context, message)` pair within a cooldown window.
//! It is an explicitly owned instance, not a global: tests construct their
//! own with a short window and a capturing sink, and the paused tokio clock
//! controls time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{ClassifiedError, ErrorKind};

/// Default cooldown between identical reports.
pub const DEFAULT_REPORT_WINDOW: Duration = Duration::from_secs(5);

const UNKNOWN_CONTEXT: &str = "unknown";

/// One forwarded error, as seen by a sink.
#[derive(Debug)]
pub struct ErrorRecord<'a> {
    pub context: &'a str,
    pub message: &'a str,
    pub kind: ErrorKind,
    pub status_code: Option<u16>,
}

/// Destination for forwarded error records.
///
/// Production wires a telemetry-backed implementation here; the default
/// writes structured `tracing` events.
pub trait ErrorSink: Send + Sync {
    fn emit(&self, record: &ErrorRecord<'_>);
}

/// Sink that logs records via `tracing::error!`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn emit(&self, record: &ErrorRecord<'_>) {
        tracing::error!(
            context = record.context,
            kind = ?record.kind,
            status = record.status_code,
            "{}",
            record.message
        );
    }
}

/// Forwards errors to a sink, once per `(context, message)` pair per window.
pub struct ErrorReporter {
    window: Duration,
    sink: Arc<dyn ErrorSink>,
    last_reported: Mutex<HashMap<String, Instant>>,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_REPORT_WINDOW,
            sink: Arc::new(TracingSink),
            last_reported: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Report an error under a context label. Never panics.
    ///
    /// The report is forwarded only if no identical `(context, message)`
    /// pair was forwarded within the window. Forwarding refreshes the
    /// record's timestamp; suppressed reports do not, so a steady burst
    /// reports once per window instead of drifting indefinitely.
    pub fn report(&self, error: &ClassifiedError, context: Option<&str>) {
        let context = context.unwrap_or(UNKNOWN_CONTEXT);
        let key = format!("{context}|{}", error.message());
        let now = Instant::now();

        let mut last_reported = self
            .last_reported
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(last) = last_reported.get(&key) {
            if now.duration_since(*last) < self.window {
                return;
            }
        }
        last_reported.insert(key, now);
        drop(last_reported);

        self.sink.emit(&ErrorRecord {
            context,
            message: error.message(),
            kind: error.kind(),
            status_code: error.status_code(),
        });
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("window", &self.window)
            .field("sink", &"..")
            .finish()
    }
}
