//! Retry wrapper for critical operations

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::utils::calc_exp_backoff;

/// Retry options
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Retries after the first attempt; the operation runs at most
    /// `max_retries + 1` times
    pub max_retries: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Upper bound for any single delay
    pub max_delay: Duration,

    /// Growth factor between consecutive delays
    pub multiplier: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryOptions {
    /// Default backoff with a custom retry count
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// No waiting between attempts
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    fn delay_before_retry(&self, retry: u32) -> Duration {
        calc_exp_backoff(self.base_delay, self.max_delay, self.multiplier, retry)
    }
}

/// Run `operation` until it succeeds or `max_retries` retries are spent.
///
/// The last error is returned unchanged.
pub async fn retry<T, E, F, Fut>(options: &RetryOptions, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut retries = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if retries < options.max_retries => {
                let delay = options.delay_before_retry(retries);
                retries += 1;
                warn!(
                    "Attempt {}/{} failed, retrying in {:?}: {}",
                    retries,
                    options.max_retries + 1,
                    delay,
                    e
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                debug!("Giving up after {} attempts", retries + 1);
                return Err(e);
            }
        }
    }
}

/// [`retry`] with default backoff
pub async fn retry_with<T, E, F, Fut>(operation: F, max_retries: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry(&RetryOptions::with_max_retries(max_retries), operation).await
}
