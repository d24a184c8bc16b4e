use std::future::Future;
use std::time::Duration;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Errors that can tell whether another attempt is worth making.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt, so the operation runs at most `max_retries + 1` times.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay slept after failed attempt `attempt` (0-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .checked_mul(2u32.saturating_pow(attempt))
            .unwrap_or(Duration::MAX)
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the retry budget is spent. The last error is returned on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    log::warn!(
                        "Transient failure on attempt {}/{}: {}. Retrying in {:?}",
                        attempt + 1,
                        self.max_retries + 1,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_retries_unavailable_then_succeeds() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        let calls: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

        let recorded = calls.clone();
        let result = policy
            .run(|| {
                let recorded = recorded.clone();
                async move {
                    let mut calls = recorded.lock().unwrap();
                    calls.push(Instant::now());
                    if calls.len() < 3 {
                        Err(ModelError::new(Some(503), "Service Unavailable"))
                    } else {
                        Ok("itinerary")
                    }
                }
            })
            .await;

        assert_eq!(result, Ok("itinerary"));
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1] - calls[0], Duration::from_millis(100));
        assert_eq!(calls[2] - calls[1], Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_propagates_immediately() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        let calls = Arc::new(Mutex::new(0u32));

        let counter = calls.clone();
        let started = Instant::now();
        let result: Result<(), ModelError> = policy
            .run(|| {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Err(ModelError::new(Some(400), "Bad Request"))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status, Some(400));
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        let calls = Arc::new(Mutex::new(0u32));

        let counter = calls.clone();
        let result: Result<(), ModelError> = policy
            .run(|| {
                let counter = counter.clone();
                async move {
                    let mut n = counter.lock().unwrap();
                    *n += 1;
                    Err(ModelError::new(Some(429), format!("rate limited #{}", *n)))
                }
            })
            .await;

        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(result.unwrap_err().message, "rate limited #3");
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(5, Duration::from_millis(250));
        assert_eq!(policy.delay_for(0), Duration::from_millis(250));
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    }
}
