// crates/interaction/src/infrastructure/repositories/cached_interaction_repository.rs

//! Repository cache-aside / write-through.
//!
//! - Écritures : le Store d'abord (source de vérité), puis incrément conditionnel du cache.
//! - Lectures : cache, puis Store sur miss ou erreur cache, avec réchauffage asynchrone.
//! - Lectures de lot (`batch_inc_read`) : Store uniquement, le cache peut être en retard
//!   jusqu'au prochain `Set` ou jusqu'à l'expiration de la clé.

use async_trait::async_trait;
use shared_kernel::application::Deadline;
use shared_kernel::errors::{DomainError, Result};
use shared_kernel::infrastructure::concurrency::Singleflight;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::models::Interaction;
use crate::domain::repositories::{InteractionCache, InteractionRepository, InteractionStore};
use crate::domain::value_objects::{BizDomain, CollectionId, InteractionCounts, ItemId, UserId};
use crate::infrastructure::repositories::cache_warmer::{
    CacheWarmer, DEFAULT_WARM_QUEUE_CAPACITY, DEFAULT_WARM_WRITE_TIMEOUT,
};

pub struct CachedInteractionRepository {
    store: Arc<dyn InteractionStore>,
    cache: Arc<dyn InteractionCache>,
    warmer: CacheWarmer,
    inflight: Singleflight<(BizDomain, ItemId), InteractionCounts>,
}

impl CachedInteractionRepository {
    /// Doit être appelé dans un runtime tokio (démarre le worker de réchauffage)
    pub fn new(store: Arc<dyn InteractionStore>, cache: Arc<dyn InteractionCache>) -> Self {
        let (warmer, _) = CacheWarmer::spawn(
            cache.clone(),
            DEFAULT_WARM_QUEUE_CAPACITY,
            DEFAULT_WARM_WRITE_TIMEOUT,
        );
        Self::with_warmer(store, cache, warmer)
    }

    pub fn with_warmer(
        store: Arc<dyn InteractionStore>,
        cache: Arc<dyn InteractionCache>,
        warmer: CacheWarmer,
    ) -> Self {
        Self {
            store,
            cache,
            warmer,
            inflight: Singleflight::new(),
        }
    }

    pub fn warmer(&self) -> &CacheWarmer {
        &self.warmer
    }

    async fn load_counts(&self, domain: &BizDomain, item_id: ItemId) -> Result<InteractionCounts> {
        // Un seul aller-retour Store par clé, même sous rafale de miss
        self.inflight
            .execute((domain.clone(), item_id), move || async move {
                let counter = self.store.get(domain, item_id).await?;
                let counts = counter.counts();
                self.warmer.schedule(domain.clone(), item_id, counts);
                Ok(counts)
            })
            .await
    }

    fn not_found_as_false<T>(result: Result<T>, present: impl FnOnce(T) -> bool) -> Result<bool> {
        match result {
            Ok(value) => Ok(present(value)),
            Err(DomainError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl InteractionRepository for CachedInteractionRepository {
    async fn inc_read(&self, domain: &BizDomain, item_id: ItemId, deadline: Deadline) -> Result<()> {
        deadline
            .run("store.inc_read", self.store.inc_read(domain, item_id))
            .await?;
        deadline
            .run("cache.incr_read", self.cache.incr_read_if_present(domain, item_id))
            .await
    }

    async fn batch_inc_read(
        &self,
        domains: &[BizDomain],
        ids: &[ItemId],
        deadline: Deadline,
    ) -> Result<()> {
        deadline
            .run("store.batch_inc_read", self.store.batch_inc_read(domains, ids))
            .await
    }

    async fn inc_like(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool> {
        let applied = deadline
            .run("store.inc_like", self.store.inc_like(domain, item_id, user_id))
            .await?;

        if applied {
            deadline
                .run("cache.incr_like", self.cache.incr_like_if_present(domain, item_id))
                .await?;
        }

        Ok(applied)
    }

    async fn dec_like(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool> {
        let applied = deadline
            .run("store.dec_like", self.store.dec_like(domain, item_id, user_id))
            .await?;

        if applied {
            deadline
                .run("cache.decr_like", self.cache.decr_like(domain, item_id))
                .await?;
        }

        Ok(applied)
    }

    async fn inc_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        collection_id: CollectionId,
        deadline: Deadline,
    ) -> Result<()> {
        deadline
            .run(
                "store.inc_collect",
                self.store.inc_collect(domain, item_id, user_id, collection_id),
            )
            .await?;
        deadline
            .run("cache.incr_collect", self.cache.incr_collect_if_present(domain, item_id))
            .await
    }

    async fn dec_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool> {
        let applied = deadline
            .run("store.dec_collect", self.store.dec_collect(domain, item_id, user_id))
            .await?;

        if applied {
            deadline
                .run("cache.decr_collect", self.cache.decr_collect(domain, item_id))
                .await?;
        }

        Ok(applied)
    }

    async fn get(&self, domain: &BizDomain, item_id: ItemId, deadline: Deadline) -> Result<Interaction> {
        match deadline.run("cache.get", self.cache.get(domain, item_id)).await {
            Ok(Some(counts)) => return Ok(Interaction::from_counts(domain.clone(), item_id, counts)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    item_id = %item_id,
                    error = %e,
                    "Cache read failed, falling back to store"
                );
            }
        }

        let counts = deadline
            .run("store.get", self.load_counts(domain, item_id))
            .await?;

        Ok(Interaction::from_counts(domain.clone(), item_id, counts))
    }

    async fn get_like_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool> {
        let result = deadline
            .run("store.get_like_info", self.store.get_like_info(domain, item_id, user_id))
            .await;

        Self::not_found_as_false(result, |status| status.is_liked())
    }

    async fn get_collect_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool> {
        let result = deadline
            .run(
                "store.get_collect_info",
                self.store.get_collect_info(domain, item_id, user_id),
            )
            .await;

        Self::not_found_as_false(result, |_| true)
    }

    async fn get_by_ids(
        &self,
        domain: &BizDomain,
        ids: &[ItemId],
        deadline: Deadline,
    ) -> Result<HashMap<ItemId, Interaction>> {
        let counters = deadline
            .run("store.get_by_ids", self.store.get_by_ids(domain, ids))
            .await?;

        Ok(counters
            .into_iter()
            .map(|(id, counter)| (id, Interaction::from(counter)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{InteractionCacheStub, InteractionStoreStub};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    struct Fixture {
        store: Arc<InteractionStoreStub>,
        cache: Arc<InteractionCacheStub>,
        repo: Arc<CachedInteractionRepository>,
    }

    fn fixture(store: InteractionStoreStub, cache: InteractionCacheStub) -> Fixture {
        let store = Arc::new(store);
        let cache = Arc::new(cache);
        let repo = Arc::new(CachedInteractionRepository::new(store.clone(), cache.clone()));
        Fixture { store, cache, repo }
    }

    fn article() -> BizDomain {
        BizDomain::from_raw("article")
    }

    fn item(id: i64) -> ItemId {
        ItemId::from_raw(id)
    }

    fn user(id: i64) -> UserId {
        UserId::from_raw(id)
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_get_warms_cache_then_hits() {
        let counts = InteractionCounts::new(10, 4, 2);
        let f = fixture(
            InteractionStoreStub::default().with_counts(&article(), item(1), counts),
            InteractionCacheStub::default(),
        );

        let first = f.repo.get(&article(), item(1), deadline()).await.unwrap();
        assert_eq!(first.counts, counts);

        // Laisse tourner le worker de réchauffage
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(f.cache.entry(&article(), item(1)), Some(counts));

        let second = f.repo.get(&article(), item(1), deadline()).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(f.store.get_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_missing_row_is_not_found_and_not_cached() {
        let f = fixture(InteractionStoreStub::default(), InteractionCacheStub::default());

        let err = f.repo.get(&article(), item(404), deadline()).await.unwrap_err();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(err.is_not_found());
        assert_eq!(f.cache.entry(&article(), item(404)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_on_cold_key_does_not_create_cache_entry() {
        let f = fixture(InteractionStoreStub::default(), InteractionCacheStub::default());

        f.repo.inc_read(&article(), item(1), deadline()).await.unwrap();
        f.repo.inc_like(&article(), item(1), user(7), deadline()).await.unwrap();

        assert_eq!(f.cache.entry(&article(), item(1)), None);
        assert_eq!(f.store.counts(&article(), item(1)), Some(InteractionCounts::new(1, 1, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_on_warm_key_updates_cache() {
        let counts = InteractionCounts::new(5, 1, 0);
        let f = fixture(
            InteractionStoreStub::default().with_counts(&article(), item(1), counts),
            InteractionCacheStub::default().with_entry(&article(), item(1), counts),
        );

        f.repo.inc_read(&article(), item(1), deadline()).await.unwrap();
        f.repo
            .inc_collect(&article(), item(1), user(7), CollectionId::default(), deadline())
            .await
            .unwrap();

        assert_eq!(f.cache.entry(&article(), item(1)), Some(InteractionCounts::new(6, 1, 1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_like_toggle_is_idempotent_in_store_and_cache() {
        let f = fixture(
            InteractionStoreStub::default(),
            InteractionCacheStub::default().with_entry(&article(), item(1), InteractionCounts::default()),
        );

        assert!(f.repo.inc_like(&article(), item(1), user(7), deadline()).await.unwrap());
        assert!(!f.repo.inc_like(&article(), item(1), user(7), deadline()).await.unwrap());
        assert_eq!(f.cache.entry(&article(), item(1)).unwrap().like.value(), 1);

        assert!(f.repo.dec_like(&article(), item(1), user(7), deadline()).await.unwrap());
        assert!(!f.repo.dec_like(&article(), item(1), user(7), deadline()).await.unwrap());
        assert_eq!(f.cache.entry(&article(), item(1)).unwrap().like.value(), 0);
        assert_eq!(f.store.counts(&article(), item(1)).unwrap().like.value(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_read_error_falls_back_to_store() {
        let counts = InteractionCounts::new(1, 2, 3);
        let cache = InteractionCacheStub::default();
        cache.fail_reads.store(true, Ordering::SeqCst);
        let f = fixture(
            InteractionStoreStub::default().with_counts(&article(), item(1), counts),
            cache,
        );

        let interaction = f.repo.get(&article(), item(1), deadline()).await.unwrap();

        assert_eq!(interaction.counts, counts);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_write_error_is_surfaced_after_store_commit() {
        let cache = InteractionCacheStub::default();
        cache.fail_writes.store(true, Ordering::SeqCst);
        let f = fixture(InteractionStoreStub::default(), cache);

        let result = f.repo.inc_read(&article(), item(1), deadline()).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(f.store.counts(&article(), item(1)).unwrap().read.value(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_share_one_store_read() {
        let store = InteractionStoreStub::default().with_counts(&article(), item(1), InteractionCounts::new(9, 0, 0));
        store.delay_gets(Duration::from_millis(50));
        let f = fixture(store, InteractionCacheStub::default());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = f.repo.clone();
            handles.push(tokio::spawn(async move {
                repo.get(&article(), item(1), Deadline::after(Duration::from_secs(1))).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().counts.read.value(), 9);
        }
        assert_eq!(f.store.get_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_hits_deadline() {
        let store = InteractionStoreStub::default().with_counts(&article(), item(1), InteractionCounts::default());
        store.delay_gets(Duration::from_secs(5));
        let f = fixture(store, InteractionCacheStub::default());

        let err = f
            .repo
            .get(&article(), item(1), Deadline::after(Duration::from_millis(100)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::Timeout { operation: "store.get" });
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_lookups_turn_not_found_into_false() {
        let f = fixture(InteractionStoreStub::default(), InteractionCacheStub::default());

        assert!(!f.repo.get_like_info(&article(), item(1), user(7), deadline()).await.unwrap());
        assert!(!f.repo.get_collect_info(&article(), item(1), user(7), deadline()).await.unwrap());

        f.repo.inc_like(&article(), item(1), user(7), deadline()).await.unwrap();
        f.repo.dec_like(&article(), item(1), user(7), deadline()).await.unwrap();

        // La ligne existe mais le statut est à false
        assert!(!f.repo.get_like_info(&article(), item(1), user(7), deadline()).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_inc_read_bypasses_cache() {
        let counts = InteractionCounts::new(1, 0, 0);
        let f = fixture(
            InteractionStoreStub::default().with_counts(&article(), item(1), counts),
            InteractionCacheStub::default().with_entry(&article(), item(1), counts),
        );

        f.repo
            .batch_inc_read(&[article(), article()], &[item(1), item(1)], deadline())
            .await
            .unwrap();

        assert_eq!(f.store.counts(&article(), item(1)).unwrap().read.value(), 3);
        assert_eq!(f.cache.entry(&article(), item(1)), Some(counts));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_ids_omits_missing_ids() {
        let f = fixture(
            InteractionStoreStub::default()
                .with_counts(&article(), item(1), InteractionCounts::new(1, 0, 0))
                .with_counts(&article(), item(3), InteractionCounts::new(3, 0, 0)),
            InteractionCacheStub::default(),
        );

        let found = f
            .repo
            .get_by_ids(&article(), &[item(1), item(2), item(3)], deadline())
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(!found.contains_key(&item(2)));
        assert_eq!(found[&item(3)].counts.read.value(), 3);
    }
}
