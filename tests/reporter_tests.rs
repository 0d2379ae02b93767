//! Tests for deduplicated error reporting.

mod common;

use std::time::Duration;

use common::CapturingSink;
use taleweaver::error::ClassifiedError;
use taleweaver::report::ErrorReporter;

fn reporter_with(sink: std::sync::Arc<CapturingSink>, window: Duration) -> ErrorReporter {
    ErrorReporter::new().with_window(window).with_sink(sink)
}

#[tokio::test(start_paused = true)]
async fn identical_reports_within_the_window_log_once() {
    let sink = CapturingSink::new();
    let reporter = reporter_with(sink.clone(), Duration::from_secs(5));
    let err = ClassifiedError::from_status(500, "boom");

    reporter.report(&err, Some("story-generation"));
    reporter.report(&err, Some("story-generation"));

    assert_eq!(sink.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn reports_again_after_the_window_elapses() {
    let sink = CapturingSink::new();
    let reporter = reporter_with(sink.clone(), Duration::from_secs(5));
    let err = ClassifiedError::from_status(500, "boom");

    reporter.report(&err, Some("story-generation"));
    tokio::time::advance(Duration::from_secs(6)).await;
    reporter.report(&err, Some("story-generation"));

    assert_eq!(sink.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn suppressed_reports_do_not_extend_the_window() {
    let sink = CapturingSink::new();
    let reporter = reporter_with(sink.clone(), Duration::from_secs(5));
    let err = ClassifiedError::from_status(500, "boom");

    // t=0: forwarded. t=3: suppressed (must not refresh the timestamp).
    // t=6: six seconds since the last *forwarded* report, so it logs.
    reporter.report(&err, Some("ctx"));
    tokio::time::advance(Duration::from_secs(3)).await;
    reporter.report(&err, Some("ctx"));
    tokio::time::advance(Duration::from_secs(3)).await;
    reporter.report(&err, Some("ctx"));

    assert_eq!(sink.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn different_contexts_or_messages_are_not_deduplicated() {
    let sink = CapturingSink::new();
    let reporter = reporter_with(sink.clone(), Duration::from_secs(5));

    reporter.report(&ClassifiedError::from_status(500, "boom"), Some("ctx-a"));
    reporter.report(&ClassifiedError::from_status(500, "boom"), Some("ctx-b"));
    reporter.report(&ClassifiedError::from_status(404, "gone"), Some("ctx-a"));

    assert_eq!(sink.count(), 3);
}

#[tokio::test(start_paused = true)]
async fn missing_context_uses_the_placeholder() {
    let sink = CapturingSink::new();
    let reporter = reporter_with(sink.clone(), Duration::from_secs(5));
    let err = ClassifiedError::validation("bad input");

    reporter.report(&err, None);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "unknown");
    assert_eq!(records[0].1, err.message());
}
