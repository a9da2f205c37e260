//! Exponential backoff for transient shop API failures.
//!
//! Retriable: network-level failures, HTTP 429 and HTTP 5xx. Everything else
//! (401, 404, other 4xx, malformed bodies) is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Delay ceiling for a single backoff sleep.
const MAX_DELAY_MS: u64 = 30_000;

fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::RateLimited { .. } => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::Deserialize { .. }
        | ClientError::Unauthorized { .. }
        | ClientError::NotFound { .. }
        | ClientError::Normalization { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// The n-th retry waits `backoff_base_ms * 2^(n-1)` milliseconds, capped at
/// 30 s. With `max_retries = 3` the operation runs at most 4 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }

                let delay_ms = backoff_base_ms
                    .saturating_mul(1u64 << attempt.min(20))
                    .min(MAX_DELAY_MS);
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient shop API error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> ClientError {
        ClientError::UnexpectedStatus {
            status: 503,
            url: "http://shops.test/api/shops".to_owned(),
        }
    }

    #[test]
    fn classifies_errors() {
        assert!(is_retriable(&server_error()));
        assert!(is_retriable(&ClientError::RateLimited {
            retry_after_secs: 1
        }));
        assert!(!is_retriable(&ClientError::UnexpectedStatus {
            status: 400,
            url: String::new()
        }));
        assert!(!is_retriable(&ClientError::Unauthorized { url: String::new() }));
        assert!(!is_retriable(&ClientError::NotFound { url: String::new() }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ClientError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(server_error())
            }
        })
        .await;
        assert!(matches!(
            result,
            Err(ClientError::UnexpectedStatus { status: 503, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_unauthorized() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(ClientError::Unauthorized {
                    url: "http://shops.test".to_owned(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(ClientError::Unauthorized { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1, "401 must not be retried");
    }
}
