use std::time::Duration;

use tracing::warn;

/// Fixed-delay retry policy for the startup connection.
///
/// `max_retries` counts retries after the initial attempt, so the
/// operation runs at most `max_retries + 1` times. This is the only
/// retry policy in the system: steady-state queries never retry.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// A policy suitable for quick unit tests (no real waiting).
    pub fn instant() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_millis(1),
        }
    }
}

/// Retry an async operation with a fixed delay between attempts.
///
/// Returns `Ok` on the first success, or the last error once every
/// attempt has failed.
pub async fn retry_fixed<F, Fut, T, E>(policy: &RetryPolicy, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = policy.max_retries + 1;
    let mut last_err: Option<E> = None;

    for attempt in 1..=attempts {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt < attempts {
                    warn!(
                        attempt,
                        max = attempts,
                        delay_ms = policy.delay.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(policy.delay).await;
                } else {
                    warn!(attempt, max = attempts, error = %e, "all attempts exhausted");
                }
                last_err = Some(e);
            }
        }
    }

    // The loop assigns last_err whenever every attempt fails.
    Err(last_err.expect("retry ended without an error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_on_first_attempt() {
        let policy = RetryPolicy::instant();
        let calls = Arc::new(AtomicU32::new(0));
        let calls2 = calls.clone();

        let result: Result<u32, String> = retry_fixed(&policy, || {
            let c = calls2.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn succeeds_after_failures() {
        let policy = RetryPolicy::instant();
        let calls = Arc::new(AtomicU32::new(0));
        let calls2 = calls.clone();

        let result: Result<u32, String> = retry_fixed(&policy, || {
            let c = calls2.clone();
            async move {
                let n = c.fetch_add(1, Ordering::Relaxed) + 1;
                if n < 3 {
                    Err(format!("attempt {n} failed"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn exhausts_attempts_and_returns_last_error() {
        // 3 retries = 4 attempts total.
        let policy = RetryPolicy::instant();
        let calls = Arc::new(AtomicU32::new(0));
        let calls2 = calls.clone();

        let result: Result<u32, String> = retry_fixed(&policy, || {
            let c = calls2.clone();
            async move {
                let n = c.fetch_add(1, Ordering::Relaxed) + 1;
                Err(format!("attempt {n} failed"))
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "attempt 4 failed");
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn zero_retries_runs_once() {
        let policy = RetryPolicy {
            max_retries: 0,
            delay: Duration::from_millis(1),
        };
        let calls = Arc::new(AtomicU32::new(0));
        let calls2 = calls.clone();

        let result: Result<(), String> = retry_fixed(&policy, || {
            let c = calls2.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
                Err("fail".to_string())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.delay, Duration::from_secs(3));
    }
}
