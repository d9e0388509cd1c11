//! Timeout and retry policy for supplier calls
//!
//! Each attempt runs under a timeout. Transport failures (including timeouts)
//! are retried with exponential backoff; every other error surfaces at once.

use std::future::Future;
use std::time::Duration;

use crate::error::SupplierError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Timeout for a single attempt in milliseconds
    pub timeout_ms: u64,
    /// Maximum number of retry attempts (0 = no retries)
    pub max_retries: u32,
    /// Base delay between retries in milliseconds (exponential backoff)
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single attempt, no backoff
    #[cfg(test)]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_delay_ms`
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let shift = attempt.min(63);
        let multiplier = 1u64 << shift;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier);
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    /// Run `call` under the policy
    ///
    /// `call` is invoked once per attempt, so it must be safe to repeat.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, SupplierError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SupplierError>>,
    {
        let timeout = Duration::from_millis(self.timeout_ms);
        let mut attempt = 0;

        loop {
            let result = match tokio::time::timeout(timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(SupplierError::Timeout(self.timeout_ms)),
            };

            match result {
                Err(e) if e.is_transport() && attempt < self.max_retries => {
                    let delay = self.calculate_delay(attempt);
                    tracing::warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Supplier call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryConfig {
        RetryConfig::new()
            .with_max_retries(max_retries)
            .with_base_delay_ms(1)
            .with_max_delay_ms(5)
            .with_timeout_ms(200)
    }

    #[test]
    fn delay_grows_exponentially_and_caps() {
        let policy = RetryConfig::new()
            .with_base_delay_ms(100)
            .with_max_delay_ms(1000);

        assert_eq!(policy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(400));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(800));
        assert_eq!(policy.calculate_delay(4), Duration::from_millis(1000));
        assert_eq!(policy.calculate_delay(200), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn transport_errors_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = fast_policy(3)
            .run("place_order", || async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(SupplierError::Transport("connection refused".into()))
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = fast_policy(2)
            .run("place_order", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SupplierError::Transport("connection refused".into()))
            })
            .await;

        assert!(matches!(result, Err(SupplierError::Transport(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_transport_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = fast_policy(5)
            .run("place_order", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SupplierError::Rejected("out of stock".into()))
            })
            .await;

        assert!(matches!(result, Err(SupplierError::Rejected(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let policy = RetryConfig::no_retry().with_timeout_ms(20);

        let result: Result<(), _> = policy
            .run("get_status", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(SupplierError::Timeout(20))));
    }
}
