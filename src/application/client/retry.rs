//! Retry-with-timeout wrapper.
//!
//! Only the invite resend endpoint goes through this; every other call
//! surfaces its first failure directly.

use std::future::Future;
use std::time::Duration;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub attempts: u32,

    /// Timeout applied to each attempt individually
    pub per_attempt_timeout: Duration,

    /// Base delay; attempt `n` waits `delay * n` before retrying
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            per_attempt_timeout: Duration::from_secs(10),
            delay: Duration::from_secs(1),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempts are exhausted. The last error is returned.
pub async fn retry_with_timeout<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        let result = match tokio::time::timeout(policy.per_attempt_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(policy.per_attempt_timeout)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                tracing::warn!(attempt, max_attempts = attempts, error = %err, "Retrying request");
                tokio::time::sleep(policy.delay * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
