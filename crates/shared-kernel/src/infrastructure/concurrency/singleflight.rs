// crates/shared-kernel/src/infrastructure/concurrency/singleflight.rs

//! # Singleflight - Déduplication de chargements concurrents
//!
//! Garantit qu'un seul chargement est en vol par clé. Le premier appelant (leader) exécute
//! la fabrique, les suivants attendent son résultat partagé.
//!
//! L'entrée du leader est retirée par un guard RAII : si le leader est annulé (deadline,
//! client déconnecté), la clé est libérée et un suiveur reprend le rôle de leader au lieu
//! de rester bloqué.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

use crate::errors::Result;

type InFlight<T> = Shared<oneshot::Receiver<Result<T>>>;

pub struct Singleflight<K, T> {
    requests: DashMap<K, (u64, InFlight<T>)>,
    generation: AtomicU64,
}

/// Libère la clé du leader, même si son futur est abandonné en cours de route
struct LeaderGuard<'a, K: Hash + Eq, T> {
    requests: &'a DashMap<K, (u64, InFlight<T>)>,
    key: K,
    generation: u64,
}

impl<K: Hash + Eq, T> Drop for LeaderGuard<'_, K, T> {
    fn drop(&mut self) {
        // On ne retire que notre propre entrée, jamais celle d'un leader plus récent
        self.requests
            .remove_if(&self.key, |_, (generation, _)| *generation == self.generation);
    }
}

enum Role<T> {
    Leader(u64, oneshot::Sender<Result<T>>),
    Follower(InFlight<T>),
}

impl<K, T> Default for Singleflight<K, T>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Singleflight<K, T>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    pub async fn execute<F, Fut>(&self, key: K, factory: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut factory = Some(factory);

        loop {
            // Check-and-insert atomique sur la clé
            let role = match self.requests.entry(key.clone()) {
                Entry::Occupied(entry) => Role::Follower(entry.get().1.clone()),
                Entry::Vacant(entry) => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let (tx, rx) = oneshot::channel();
                    entry.insert((generation, rx.shared()));
                    Role::Leader(generation, tx)
                }
            };

            match role {
                Role::Leader(generation, tx) => {
                    let _guard = LeaderGuard {
                        requests: &self.requests,
                        key: key.clone(),
                        generation,
                    };

                    // Le verrou DashMap est relâché avant l'await
                    let Some(factory) = factory.take() else {
                        unreachable!("a caller becomes leader at most once");
                    };
                    let result = factory().await;
                    let _ = tx.send(result.clone());

                    return result;
                }
                Role::Follower(in_flight) => match in_flight.await {
                    Ok(result) => return result,
                    // Leader annulé : la clé est libre, on retente
                    Err(_) => continue,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_load() {
        let flight = Arc::new(Singleflight::<String, u64>::new());
        let loads = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let flight = flight.clone();
            let loads = loads.clone();
            handles.push(tokio::spawn(async move {
                flight
                    .execute("article:1".to_string(), || async move {
                        loads.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(7)
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 7);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(flight.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_shared_with_followers() {
        let flight = Arc::new(Singleflight::<&'static str, u64>::new());

        let leader = tokio::spawn({
            let flight = flight.clone();
            async move {
                flight
                    .execute("k", || async {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Err(DomainError::Infrastructure("db down".into()))
                    })
                    .await
            }
        });
        tokio::task::yield_now().await;
        let follower = flight.execute("k", || async { Ok(1) }).await;

        assert!(leader.await.unwrap().is_err());
        assert!(matches!(follower, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_leader_releases_key() {
        let flight = Arc::new(Singleflight::<&'static str, u64>::new());

        let leader = tokio::spawn({
            let flight = flight.clone();
            async move {
                flight
                    .execute("k", || async {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        Ok(1)
                    })
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert_eq!(flight.in_flight(), 1);

        let follower = tokio::spawn({
            let flight = flight.clone();
            async move { flight.execute("k", || async { Ok(2) }).await }
        });
        tokio::task::yield_now().await;

        leader.abort();
        let _ = leader.await;

        // Le suiveur prend la relève au lieu de rester bloqué
        assert_eq!(follower.await.unwrap().unwrap(), 2);
        assert_eq!(flight.in_flight(), 0);
    }
}
