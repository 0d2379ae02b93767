//! Error types for Taleweaver.
//!
//! Every failure surfaced by this crate is a [`ClassifiedError`]: a raw
//! transport or server failure normalized into a closed [`ErrorKind`] plus a
//! user-facing message. The raw cause is retained on the error for logging
//! but is never shown to users.

pub mod classify;

pub use classify::user_message_for_status;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure kinds. Immutable once assigned to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Validation,
    Api,
    Timeout,
    Storage,
    Upload,
    Generation,
    Unknown,
}

impl ErrorKind {
    /// Default localized sentence for this kind.
    ///
    /// `Unknown` has no table entry: callers fall back to the classified
    /// error's own message, or [`classify::GENERIC_MESSAGE`].
    pub fn default_message(self) -> Option<&'static str> {
        match self {
            Self::Network => Some(classify::NETWORK_MESSAGE),
            Self::Validation => Some(classify::VALIDATION_MESSAGE),
            Self::Api => Some(classify::API_MESSAGE),
            Self::Timeout => Some(classify::TIMEOUT_MESSAGE),
            Self::Storage => Some(classify::STORAGE_MESSAGE),
            Self::Upload => Some(classify::UPLOAD_MESSAGE),
            Self::Generation => Some(classify::GENERATION_MESSAGE),
            Self::Unknown => None,
        }
    }
}

/// Normalized failure record derived from a raw transport/runtime failure.
///
/// `Display` is the user-facing message; `status_code`, `detail`, and the
/// `source` chain exist for logging and diagnostics only.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    status_code: Option<u16>,
    detail: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    cancelled: bool,
}

impl ClassifiedError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            detail: None,
            source: None,
            cancelled: false,
        }
    }

    /// API failure for an explicit HTTP status, message taken verbatim.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            ..Self::new(ErrorKind::Api, message)
        }
    }

    /// Client-side input validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Local storage failure.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// File upload failure. The server's `detail` text becomes the message
    /// when present, otherwise the localized upload sentence.
    pub fn upload(detail: Option<String>) -> Self {
        let message = detail
            .clone()
            .unwrap_or_else(|| classify::UPLOAD_MESSAGE.to_string());
        Self {
            detail,
            ..Self::new(ErrorKind::Upload, message)
        }
    }

    /// Story/image/audio generation failure.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generation, message)
    }

    /// Unclassifiable failure; the raw message is passed through when
    /// non-empty, else the generic fallback sentence.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            classify::GENERIC_MESSAGE.to_string()
        } else {
            message
        };
        Self::new(ErrorKind::Unknown, message)
    }

    /// Caller-driven abort. Never retried by [`crate::util::retry::RetryPolicy`].
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::new(ErrorKind::Unknown, classify::CANCELLED_MESSAGE)
        }
    }

    /// Classify a response with a non-2xx status code.
    ///
    /// The user sees the localized sentence for the status; `raw_message`
    /// only surfaces for unmapped statuses, as a generic
    /// `"({status}): {message}"` string, always kind `Api`, never
    /// `Unknown`. Server-provided error text is attached separately via
    /// [`ClassifiedError::with_detail`].
    pub fn from_status(status: u16, raw_message: impl Into<String>) -> Self {
        let raw_message = raw_message.into();
        let (kind, message) = classify::classify_status(status, &raw_message);
        Self {
            status_code: Some(status),
            ..Self::new(kind, message)
        }
    }

    /// Attach the server-provided error text, retained for logging only.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Classify a transport-level failure.
    ///
    /// Deadline aborts map to `Timeout`, responses carrying a status go
    /// through the status table, connection-level failures (request sent,
    /// no response) map to `Network`, and everything else degrades to
    /// `Unknown` with the raw message. Total: never panics.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self {
                source: Some(Box::new(err)),
                ..Self::new(ErrorKind::Timeout, classify::TIMEOUT_MESSAGE)
            };
        }
        if let Some(status) = err.status() {
            let raw = err.to_string();
            let mut classified = Self::from_status(status.as_u16(), raw);
            classified.source = Some(Box::new(err));
            return classified;
        }
        if err.is_connect() || err.is_request() {
            return Self {
                source: Some(Box::new(err)),
                ..Self::new(ErrorKind::Network, classify::NETWORK_MESSAGE)
            };
        }
        let message = err.to_string();
        Self {
            source: Some(Box::new(err)),
            ..Self::unknown(message)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// User-facing message (same text as `Display`).
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Server-provided error text, retained for logging only.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether this failure is worth retrying: connection loss, timeouts,
    /// rate limiting, and server-side 5xx.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Network | ErrorKind::Timeout => true,
            ErrorKind::Api => matches!(self.status_code, Some(429) | Some(500..=599)),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClassifiedError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_transport(err)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ClassifiedError>;
