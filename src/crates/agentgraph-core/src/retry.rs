//! Rate-limit retry policy for reasoning service calls
//!
//! Reasoning services signal overload with a rate-limit error, optionally
//! carrying how long the caller should wait. [`RetryPolicy`] waits that long
//! (or a configured default) and tries again, a bounded number of times.
//! Only [`ModelError::RateLimited`] is retried; every other failure is
//! returned on the spot.
//!
//! ```text
//! attempt ─► Ok ───────────────────────────► return
//!    │
//!    ├─► RateLimited, retries left ─► sleep(retry_after | default) ─► attempt
//!    ├─► RateLimited, none left ────► return error
//!    └─► other error ───────────────► return error
//! ```
//!
//! # Example
//!
//! ```rust
//! use agentgraph_core::retry::RetryPolicy;
//! use std::time::Duration;
//!
//! // One retry, 30 seconds when the service gives no hint
//! let policy = RetryPolicy::default();
//! assert_eq!(policy.max_retries, 1);
//!
//! let patient = RetryPolicy::new(3).with_default_retry_after(Duration::from_secs(5));
//! assert_eq!(patient.default_retry_after, Duration::from_secs(5));
//! ```

use crate::error::ModelError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default wait when a rate-limit error carries no retry-after hint
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Bounded retry of rate-limited calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,

    /// Wait used when the service does not say how long to back off
    pub default_retry_after: Duration,
}

impl RetryPolicy {
    /// Create a policy allowing `max_retries` retries
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            default_retry_after: DEFAULT_RETRY_AFTER,
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Set the fallback wait
    pub fn with_default_retry_after(mut self, delay: Duration) -> Self {
        self.default_retry_after = delay;
        self
    }

    /// How long to wait before retrying after `error`
    ///
    /// `None` when the error is not retryable.
    pub fn delay_for(&self, error: &ModelError) -> Option<Duration> {
        match error {
            ModelError::RateLimited { retry_after, .. } => {
                Some(retry_after.unwrap_or(self.default_retry_after))
            }
            ModelError::Upstream(_) => None,
        }
    }

    /// Run `operation`, retrying rate-limited failures
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ModelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ModelError>>,
    {
        let mut retries = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let delay = match self.delay_for(&error) {
                Some(delay) if retries < self.max_retries => delay,
                _ => return Err(error),
            };

            retries += 1;
            warn!(
                retry = retries,
                max_retries = self.max_retries,
                delay_secs = delay.as_secs_f64(),
                "Rate limited, retrying: {}",
                error
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted<T: Clone + Send + 'static>(
        outcomes: Vec<Result<T, ModelError>>,
    ) -> (Arc<AtomicUsize>, impl FnMut() -> std::future::Ready<Result<T, ModelError>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(outcomes[n.min(outcomes.len() - 1)].clone())
        };
        (calls, op)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_retry_after_delay() {
        let (calls, op) = counted(vec![
            Err(ModelError::rate_limited(Some(Duration::from_secs(5)), "slow down")),
            Ok("recovered"),
        ]);

        let start = tokio::time::Instant::now();
        let result = RetryPolicy::default().execute(op).await;

        assert_eq!(result, Ok("recovered"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_delay_without_hint() {
        let (_, op) = counted(vec![Err(ModelError::rate_limited(None, "busy")), Ok(1)]);

        let start = tokio::time::Instant::now();
        RetryPolicy::default().execute(op).await.unwrap();

        assert!(start.elapsed() >= DEFAULT_RETRY_AFTER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_rate_limit_propagates() {
        let (calls, op) = counted::<()>(vec![Err(ModelError::rate_limited(
            Some(Duration::from_secs(1)),
            "still busy",
        ))]);

        let err = RetryPolicy::default().execute(op).await.unwrap_err();

        assert!(err.is_rate_limit());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_errors_not_retried() {
        let (calls, op) = counted::<()>(vec![Err(ModelError::Upstream("bad request".into()))]);

        let err = RetryPolicy::default().execute(op).await.unwrap_err();

        assert_eq!(err, ModelError::Upstream("bad request".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_retry_policy() {
        let (calls, op) = counted::<()>(vec![Err(ModelError::rate_limited(None, "busy"))]);

        assert!(RetryPolicy::none().execute(op).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
