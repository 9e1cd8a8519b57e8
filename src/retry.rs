//! Bounded retry for remote operations
//!
//! One wrapper drives all three remote lookups: attempt, sleep a fixed
//! interval on failure, give up after the configured number of attempts so
//! the caller can substitute its documented sentinel.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry discipline shared by every remote operation
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed wait between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Run `op` under the policy; `None` after the final failed attempt
///
/// Retries block the current unit of work: the sleep is awaited inline and
/// no other credential makes progress meanwhile. Callers needing the final
/// attempt's error text use [`with_retries_err`] instead.
pub async fn with_retries<T, F, Fut>(policy: RetryPolicy, op_name: &str, op: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    with_retries_err(policy, op_name, op).await.ok()
}

/// Like [`with_retries`] but surfaces the final attempt's error
pub async fn with_retries_err<T, F, Fut>(
    policy: RetryPolicy,
    op_name: &str,
    mut op: F,
) -> Result<T, anyhow::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut last_error = None;
    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt < policy.max_attempts {
                    tracing::warn!(
                        operation = op_name,
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    sleep(policy.delay).await;
                } else {
                    tracing::error!(
                        operation = op_name,
                        attempts = policy.max_attempts,
                        error = %e,
                        "Retries exhausted"
                    );
                }
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no attempts made")))
}
