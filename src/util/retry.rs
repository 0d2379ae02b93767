//! Retry with exponential backoff.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ClassifiedError;

/// Predicate deciding whether a failure should be retried.
pub type RetryPredicate = Arc<dyn Fn(&ClassifiedError) -> bool + Send + Sync>;

/// Retry policy configuration.
///
/// Attempts run strictly sequentially. The delay before attempt `k`
/// (`k >= 2`) is `base_delay * 2^(k-2)`; the first attempt runs
/// immediately.
#[derive(Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Values below 1
    /// behave as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on each further attempt.
    pub base_delay: Duration,
    /// Optional predicate limiting which failures are retried. `None`
    /// retries every failure.
    pub retry_if: Option<RetryPredicate>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("retry_if", &self.retry_if.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            retry_if: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            retry_if: None,
        }
    }

    /// Policy that retries only transient failures (network, timeout,
    /// rate limiting, 5xx). Opt-in: the default retries everything.
    pub fn transient_only(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            retry_if: Some(Arc::new(ClassifiedError::is_retryable)),
        }
    }

    pub fn with_retry_if(
        mut self,
        predicate: impl Fn(&ClassifiedError) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.retry_if = Some(Arc::new(predicate));
        self
    }

    /// Execute an async operation with retry, returning the first success
    /// or the last attempt's failure.
    ///
    /// Cancelled operations propagate immediately and are never retried.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ClassifiedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClassifiedError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt - 2));
                tokio::time::sleep(delay).await;
            }

            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if e.is_cancelled() || attempt >= max_attempts {
                        return Err(e);
                    }
                    if let Some(retry_if) = &self.retry_if {
                        if !retry_if(&e) {
                            return Err(e);
                        }
                    }

                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "retrying after error"
                    );
                    last_error = Some(e);
                }
            }
        }

        // Unreachable: the final attempt returns directly above.
        Err(last_error.unwrap_or_else(|| ClassifiedError::unknown("")))
    }
}
