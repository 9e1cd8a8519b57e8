//! Retry wrapper unit tests
//!
//! Tests the shared retry discipline:
//! - exact attempt accounting on exhaustion
//! - recovery mid-way
//! - no extra attempts after success

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use steam_sentinel::{with_retries, RetryPolicy};

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::ZERO)
}

#[tokio::test]
async fn test_exhaustion_after_exactly_configured_attempts() {
    for max_attempts in [1, 2, 3, 5] {
        let calls = AtomicU32::new(0);
        let result: Option<u8> = with_retries(policy(max_attempts), "always_down", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(anyhow::anyhow!("unreachable host")) }
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(
            calls.load(Ordering::SeqCst),
            max_attempts,
            "exactly {} attempts expected",
            max_attempts
        );
    }
}

#[tokio::test]
async fn test_success_stops_retrying() {
    let calls = AtomicU32::new(0);
    let result = with_retries(policy(5), "flaky", || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Err(anyhow::anyhow!("transient"))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Some(2));
    assert_eq!(calls.load(Ordering::SeqCst), 3, "no attempts after success");
}

#[tokio::test]
async fn test_sentinel_substitution_is_callers_choice() {
    // the wrapper only reports exhaustion; the caller owns the sentinel
    let outcome: Option<&str> =
        with_retries(policy(2), "down", || async { Err(anyhow::anyhow!("down")) }).await;
    let sentinel = outcome.unwrap_or("documented-sentinel");
    assert_eq!(sentinel, "documented-sentinel");
}
