// crates/interaction/src/infrastructure/repositories/cache_warmer.rs

//! File bornée de réchauffage du cache.
//!
//! Un miss de lecture programme un `Set` asynchrone ; l'appelant n'attend pas.
//! Si la file est pleine, la demande est abandonnée et comptée : le prochain miss
//! reprogrammera le réchauffage.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::domain::repositories::InteractionCache;
use crate::domain::value_objects::{BizDomain, InteractionCounts, ItemId};

pub const DEFAULT_WARM_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_WARM_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

struct WarmRequest {
    domain: BizDomain,
    item_id: ItemId,
    counts: InteractionCounts,
}

#[derive(Default)]
struct WarmerCounters {
    scheduled: AtomicU64,
    warmed: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheWarmerStats {
    pub scheduled: u64,
    pub warmed: u64,
    pub failed: u64,
    pub dropped: u64,
}

#[derive(Clone)]
pub struct CacheWarmer {
    tx: mpsc::Sender<WarmRequest>,
    counters: Arc<WarmerCounters>,
}

impl CacheWarmer {
    /// Démarre le worker. Il s'arrête quand le dernier `CacheWarmer` est relâché.
    pub fn spawn(
        cache: Arc<dyn InteractionCache>,
        capacity: usize,
        write_timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<WarmRequest>(capacity.max(1));
        let counters = Arc::new(WarmerCounters::default());
        let worker_counters = counters.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let write = cache.set(&request.domain, request.item_id, &request.counts);

                match tokio::time::timeout(write_timeout, write).await {
                    Ok(Ok(())) => {
                        worker_counters.warmed.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(Err(e)) => {
                        worker_counters.failed.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(
                            domain = %request.domain,
                            item_id = %request.item_id,
                            error = %e,
                            "Cache warm failed"
                        );
                    }
                    Err(_) => {
                        worker_counters.failed.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(
                            domain = %request.domain,
                            item_id = %request.item_id,
                            timeout_ms = write_timeout.as_millis() as u64,
                            "Cache warm timed out"
                        );
                    }
                }
            }

            tracing::debug!("Cache warmer stopped");
        });

        (Self { tx, counters }, handle)
    }

    pub fn schedule(&self, domain: BizDomain, item_id: ItemId, counts: InteractionCounts) {
        let request = WarmRequest {
            domain,
            item_id,
            counts,
        };

        match self.tx.try_send(request) {
            Ok(()) => {
                self.counters.scheduled.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(request)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    domain = %request.domain,
                    item_id = %request.item_id,
                    "Warm queue full, request dropped"
                );
            }
            Err(TrySendError::Closed(request)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    domain = %request.domain,
                    item_id = %request.item_id,
                    "Cache warmer is stopped, request dropped"
                );
            }
        }
    }

    pub fn stats(&self) -> CacheWarmerStats {
        CacheWarmerStats {
            scheduled: self.counters.scheduled.load(Ordering::Relaxed),
            warmed: self.counters.warmed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}
