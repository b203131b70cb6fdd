// crates/shared-kernel/src/infrastructure/retry.rs

use crate::errors::{DomainError, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(20),
            max_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryConfig {
    /// Backoff exponentiel plafonné, avec 0 à 25% de jitter
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_backoff);
        let base_ms = base.as_millis() as u64;
        let jitter = rand::rng().random_range(0..base_ms / 4 + 1);

        base + Duration::from_millis(jitter)
    }
}

/// Rejoue `action` tant qu'elle échoue sur un conflit de concurrence.
/// Toute autre erreur est rendue immédiatement.
pub async fn with_retry<F, Fut, T>(operation: &'static str, config: RetryConfig, mut action: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 0..=config.max_retries {
        match action().await {
            Ok(res) => return Ok(res),
            Err(e) if e.is_concurrency_conflict() && attempt < config.max_retries => {
                let backoff = config.backoff(attempt);

                tracing::warn!(
                    operation,
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    backoff_ms = backoff.as_millis() as u64,
                    "Concurrency conflict, retrying"
                );

                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e),
        }
    }

    Err(DomainError::TooManyConflicts(format!(
        "{operation} failed after {} retries due to persistent conflicts",
        config.max_retries
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn conflict() -> DomainError {
        DomainError::ConcurrencyConflict {
            reason: "concurrent first like".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_conflicts_until_success() {
        let calls = AtomicU32::new(0);

        let result = with_retry("like", RetryConfig::default(), || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(conflict())
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_retry("like", RetryConfig::default(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Infrastructure("down".into()))
        })
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig {
            max_retries: 2,
            ..Default::default()
        };

        let result: Result<()> = with_retry("like", config, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(conflict())
        })
        .await;

        assert!(matches!(result, Err(DomainError::TooManyConflicts(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig {
            max_retries: 10,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(300),
        };

        let backoff = config.backoff(8);
        assert!(backoff >= Duration::from_millis(300));
        assert!(backoff <= Duration::from_millis(375));
    }
}
