//! Retry logic with exponential backoff for rate-limited calls.
//!
//! Only rate-limit failures are retried; any other failure stops the
//! call immediately. The backoff doubles after every rate-limited
//! attempt, starting from [`RetryConfig::base_delay`].

use crate::error::{Error, Result};
use crate::types::RetryConfig;
use std::thread;
use std::time::Duration;

/// Callback trait for retry progress notifications.
pub trait RetryCallback {
    /// Called when an operation is being retried.
    ///
    /// # Arguments
    /// * `attempt` - Attempt number that just failed (1-indexed)
    /// * `max_attempts` - Maximum number of attempts
    /// * `error` - The error that triggered the retry
    /// * `delay` - Wait before the next attempt
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &Error, delay: Duration);
}

/// No-op callback that does nothing.
pub struct NoCallback;

impl RetryCallback for NoCallback {
    fn on_retry(&self, _attempt: u32, _max_attempts: u32, _error: &Error, _delay: Duration) {}
}

/// Callback that reports retries through the `log` crate.
pub struct LogCallback;

impl RetryCallback for LogCallback {
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &Error, delay: Duration) {
        log::warn!(
            "attempt {}/{} failed: {}; retrying in {:.1}s",
            attempt,
            max_attempts,
            error,
            delay.as_secs_f64()
        );
    }
}

/// Execute an operation with retry logic.
///
/// Runs the operation up to `config.max_attempts` times. A success
/// returns immediately; a non-retryable error returns immediately after
/// a single attempt; a rate-limit error sleeps for the current backoff
/// delay and tries again. After the final attempt the last error is
/// returned.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `callback` - Optional callback for retry notifications
/// * `operation` - The operation to execute
pub fn with_retry<T, F>(
    config: &RetryConfig,
    callback: Option<&dyn RetryCallback>,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut last_error: Option<Error> = None;

    for attempt in 1..=config.max_attempts {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                // Only rate limits are worth another attempt
                if !e.is_retryable() {
                    return Err(e);
                }

                if attempt >= config.max_attempts {
                    last_error = Some(e);
                    break;
                }

                let delay = config.delay_for_attempt(attempt);

                if let Some(cb) = callback {
                    cb.on_retry(attempt, config.max_attempts, &e, delay);
                }

                thread::sleep(delay);

                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Other("retry exhausted".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig::new(max_attempts, Duration::from_millis(1), 2.0)
    }

    #[test]
    fn test_with_retry_success_first_try() {
        let config = RetryConfig::no_retry();
        let result = with_retry(&config, None, || Ok::<_, Error>(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_with_retry_non_retryable_error() {
        let config = fast_config(5);
        let attempts = Rc::new(Cell::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<()> = with_retry(&config, None, || {
            attempts_clone.set(attempts_clone.get() + 1);
            Err(Error::Api {
                status: 400,
                message: "bad request".to_string(),
            })
        });

        assert!(result.is_err());
        // Should only try once since API errors are not retryable
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_with_retry_rate_limit_eventual_success() {
        let config = fast_config(5);
        let attempts = Rc::new(Cell::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry(&config, None, || {
            let current = attempts_clone.get();
            attempts_clone.set(current + 1);
            if current < 3 {
                Err(Error::RateLimited)
            } else {
                Ok(42)
            }
        });

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 4);
    }

    #[test]
    fn test_with_retry_backoff_schedule() {
        struct RecordingCallback(RefCell<Vec<Duration>>);
        impl RetryCallback for RecordingCallback {
            fn on_retry(&self, _: u32, _: u32, _: &Error, delay: Duration) {
                self.0.borrow_mut().push(delay);
            }
        }

        let config = fast_config(5);
        let attempts = Rc::new(Cell::new(0));
        let attempts_clone = attempts.clone();
        let callback = RecordingCallback(RefCell::new(Vec::new()));

        // Rate limited on attempts 1-3, success on attempt 4
        let result = with_retry(&config, Some(&callback), || {
            let current = attempts_clone.get();
            attempts_clone.set(current + 1);
            if current < 3 {
                Err(Error::RateLimited)
            } else {
                Ok(())
            }
        });

        assert!(result.is_ok());
        // Doubling after attempts 1, 2, 3: the wait before attempt 4
        // is 8x the base delay
        assert_eq!(
            *callback.0.borrow(),
            vec![
                Duration::from_millis(2),
                Duration::from_millis(4),
                Duration::from_millis(8),
            ]
        );
    }

    #[test]
    fn test_with_retry_all_attempts_fail() {
        let config = fast_config(5);
        let attempts = Rc::new(Cell::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<()> = with_retry(&config, None, || {
            attempts_clone.set(attempts_clone.get() + 1);
            Err(Error::RateLimited)
        });

        assert!(result.is_err());
        // Exactly 5 attempts, no 6th
        assert_eq!(attempts.get(), 5);
    }

    #[test]
    fn test_callback_invoked() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};

        struct CountingCallback(Arc<AtomicU32>);
        impl RetryCallback for CountingCallback {
            fn on_retry(&self, _: u32, _: u32, _: &Error, _: Duration) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let config = fast_config(3);
        let callback_count = Arc::new(AtomicU32::new(0));
        let callback = CountingCallback(callback_count.clone());

        let _: Result<()> = with_retry(&config, Some(&callback), || Err(Error::RateLimited));

        // Callback fires before each retry, not before the first attempt
        // and not after the last
        assert_eq!(callback_count.load(Ordering::SeqCst), 2);
    }
}
