//! Retry Executor
//!
//! Re-runs a fallible async action with exponential backoff between attempts.

use std::future::Future;

use tracing::debug;

use crate::retry::RetryConfig;

// == With Retry ==
/// Runs `action` until it succeeds or the attempt budget is spent.
///
/// Every failure is treated as retryable. On exhaustion the error from the
/// last attempt is returned as-is; earlier errors are dropped.
///
/// # Arguments
/// * `action` - Zero-argument closure producing one attempt's future
/// * `config` - Attempt budget and backoff schedule
pub async fn with_retry<T, E, F, Fut>(action: F, config: &RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    with_retry_if(action, config, |_: &E| true).await
}

// == With Retry If ==
/// Like [`with_retry`], but consults `should_retry` after each failure.
///
/// An error for which `should_retry` returns false is returned immediately
/// without sleeping.
pub async fn with_retry_if<T, E, F, Fut, P>(
    mut action: F,
    config: &RetryConfig,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.attempts();
    let mut delay = config.first_delay();
    let mut attempt = 1;

    loop {
        let err = match action().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt >= max_attempts {
            debug!(attempt, max_attempts, "retry budget exhausted");
            return Err(err);
        }
        if !should_retry(&err) {
            debug!(attempt, "failure classified as permanent, not retrying");
            return Err(err);
        }

        debug!(
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            "attempt failed, backing off"
        );
        tokio::time::sleep(delay).await;

        delay = config.next_delay(delay);
        attempt += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    struct Failure(u32);

    /// Records the instant of every invocation.
    struct Recorder {
        calls: Mutex<Vec<Instant>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn hit(&self) -> u32 {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Instant::now());
            calls.len() as u32
        }

        fn count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn gaps(&self) -> Vec<Duration> {
            let calls = self.calls.lock().unwrap();
            calls.windows(2).map(|w| w[1] - w[0]).collect()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_try() {
        let recorder = Recorder::new();
        let recorder = &recorder;
        let start = Instant::now();

        let result: Result<&str, Failure> = with_retry(
            || async move {
                recorder.hit();
                Ok("done")
            },
            &RetryConfig::default(),
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(recorder.count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let recorder = Recorder::new();
        let recorder = &recorder;
        let config = RetryConfig::default().with_max_attempts(5);
        let start = Instant::now();

        let result: Result<(), Failure> = with_retry(
            || async move { Err(Failure(recorder.hit())) },
            &config,
        )
        .await;

        assert_eq!(result, Err(Failure(5)));
        assert_eq!(recorder.count(), 5);
        assert_eq!(
            recorder.gaps(),
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
                Duration::from_millis(8000),
            ]
        );
        assert_eq!(start.elapsed(), Duration::from_millis(15_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delays_capped_at_max_delay() {
        let recorder = Recorder::new();
        let recorder = &recorder;
        let config = RetryConfig::default()
            .with_max_attempts(5)
            .with_initial_delay(Duration::from_millis(400))
            .with_backoff_factor(3.0)
            .with_max_delay(Duration::from_millis(2000));

        let _: Result<(), Failure> =
            with_retry(|| async move { Err(Failure(recorder.hit())) }, &config).await;

        assert_eq!(
            recorder.gaps(),
            vec![
                Duration::from_millis(400),
                Duration::from_millis(1200),
                Duration::from_millis(2000),
                Duration::from_millis(2000),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_success() {
        let recorder = Recorder::new();
        let recorder = &recorder;
        let start = Instant::now();

        let result = with_retry(
            || async move {
                let n = recorder.hit();
                if n < 3 {
                    Err(Failure(n))
                } else {
                    Ok(n * 10)
                }
            },
            &RetryConfig::default(),
        )
        .await;

        assert_eq!(result, Ok(30));
        assert_eq!(recorder.count(), 3);
        assert_eq!(recorder.gaps().len(), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sleep_after_final_failure() {
        let config = RetryConfig::default().with_max_attempts(1);
        let start = Instant::now();

        let result: Result<(), Failure> = with_retry(|| async move { Err(Failure(1)) }, &config).await;

        assert_eq!(result, Err(Failure(1)));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let config = RetryConfig::default().with_max_attempts(0);

        let result: Result<(), Failure> = with_retry(
            || async move { Err(Failure(calls.fetch_add(1, Ordering::SeqCst) + 1)) },
            &config,
        )
        .await;

        assert_eq!(result, Err(Failure(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_skips_retries() {
        let recorder = Recorder::new();
        let recorder = &recorder;
        let start = Instant::now();

        let result: Result<(), Failure> = with_retry_if(
            || async move { Err(Failure(recorder.hit())) },
            &RetryConfig::default(),
            |err: &Failure| err.0 != 1,
        )
        .await;

        assert_eq!(result, Err(Failure(1)));
        assert_eq!(recorder.count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_predicate_retries_transient_failures() {
        let recorder = Recorder::new();
        let recorder = &recorder;

        let result: Result<(), Failure> = with_retry_if(
            || async move { Err(Failure(recorder.hit())) },
            &RetryConfig::default().with_max_attempts(4),
            |err: &Failure| err.0 < 2,
        )
        .await;

        assert_eq!(result, Err(Failure(2)));
        assert_eq!(recorder.count(), 2);
    }
}
