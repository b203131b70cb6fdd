// crates/shared-kernel/src/application/deadline.rs

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::{DomainError, Result};

/// Deadline fournie par l'appelant (handler de transport, worker...).
/// Chaque appel Store / Cache est borné par cette deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Self {
            at: Some(Instant::now() + duration),
        }
    }

    /// Aucune borne : réservé aux tâches de fond et aux tests
    pub fn unbounded() -> Self {
        Self { at: None }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.at, Some(at) if at <= Instant::now())
    }

    /// Exécute `fut` et le coupe si la deadline est dépassée.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.at {
            None => fut.await,
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| DomainError::Timeout { operation })?,
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_timeout_when_deadline_elapses() {
        let deadline = Deadline::after(Duration::from_millis(50));

        let result: Result<()> = deadline
            .run("slow_call", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;

        assert_eq!(result, Err(DomainError::Timeout { operation: "slow_call" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_passes_through_inner_result() {
        let deadline = Deadline::after(Duration::from_secs(1));

        let ok = deadline.run("fast_call", async { Ok(42) }).await;
        assert_eq!(ok, Ok(42));

        let err: Result<()> = deadline
            .run("failing_call", async { Err(DomainError::Internal("boom".into())) })
            .await;
        assert!(matches!(err, Err(DomainError::Internal(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_never_expires() {
        let deadline = Deadline::unbounded();
        tokio::time::advance(Duration::from_secs(3600)).await;

        assert!(!deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
    }
}
