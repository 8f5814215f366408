//! Retry policy with exponential backoff and jitter.
//!
//! Only errors for which [`crate::StoreError::is_retryable`] holds are retried;
//! missing or duplicate records fail immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{info_span, warn, Instrument};

use crate::error::StoreResult;
use crate::metrics::record_retry;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay cap (in milliseconds).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Execute a store operation, retrying transient failures.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, op: F) -> StoreResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = StoreResult<T>>,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let span = info_span!("store_retry", operation = %operation, attempt);

        match op().instrument(span).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                let delay = backoff(config, attempt - 1);
                warn!(
                    operation = %operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Store operation failed, retrying: {}",
                    e
                );
                record_retry(operation);
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Exponential backoff with full jitter, never below the base delay.
fn backoff(config: &RetryConfig, attempt: u32) -> Duration {
    let exp = config
        .base_delay_ms
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(config.max_delay_ms);
    let jittered = if exp > 0 { rand::rng().random_range(0..=exp) } else { 0 };
    Duration::from_millis(jittered.max(config.base_delay_ms))
}
