//! Shared test helpers.

use std::sync::{Arc, Mutex};

use taleweaver::report::{ErrorRecord, ErrorSink};

/// Sink that records every forwarded report for later assertions.
#[derive(Default)]
pub struct CapturingSink {
    records: Mutex<Vec<(String, String)>>,
}

impl CapturingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Forwarded reports as `(context, message)` pairs.
    pub fn records(&self) -> Vec<(String, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl ErrorSink for CapturingSink {
    fn emit(&self, record: &ErrorRecord<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.context.to_string(), record.message.to_string()));
    }
}
