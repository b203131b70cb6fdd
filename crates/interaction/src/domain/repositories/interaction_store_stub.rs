// crates/interaction/src/domain/repositories/interaction_store_stub.rs

use async_trait::async_trait;
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::errors::{DomainError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::entities::{InteractionCounter, UserCollectRecord, UserLikeStatus};
use crate::domain::repositories::InteractionStore;
use crate::domain::value_objects::{BizDomain, CollectionId, CounterField, InteractionCounts, ItemId, UserId};

type ItemKey = (BizDomain, ItemId);
type UserKey = (BizDomain, ItemId, UserId);

#[derive(Default, Clone)]
struct StoreState {
    counters: HashMap<ItemKey, InteractionCounts>,
    likes: HashMap<UserKey, bool>,
    collects: HashMap<UserKey, CollectionId>,
}

impl StoreState {
    fn bump(&mut self, domain: &BizDomain, item_id: ItemId, field: CounterField, delta: i64) {
        self.counters
            .entry((domain.clone(), item_id))
            .or_default()
            .apply_delta(field, delta);
    }
}

/// Store en mémoire avec la même sémantique que Postgres (toggle, conflit de collecte, batch atomique)
#[derive(Default)]
pub struct InteractionStoreStub {
    state: Mutex<StoreState>,
    error_to_return: Mutex<Option<DomainError>>,
    failing_item: Mutex<Option<ItemId>>,
    get_delay: Mutex<Option<Duration>>,
    get_calls: AtomicUsize,
}

impl InteractionStoreStub {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    fn take_error(&self) -> Result<()> {
        match self.error_to_return.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn with_counts(self, domain: &BizDomain, item_id: ItemId, counts: InteractionCounts) -> Self {
        self.state().counters.insert((domain.clone(), item_id), counts);
        self
    }

    /// La prochaine opération échoue avec `err`
    pub fn fail_next(&self, err: DomainError) {
        *self.error_to_return.lock().unwrap() = Some(err);
    }

    /// Tout batch contenant cet item échoue (après avoir appliqué les éléments précédents)
    pub fn fail_on_item(&self, item_id: ItemId) {
        *self.failing_item.lock().unwrap() = Some(item_id);
    }

    pub fn delay_gets(&self, delay: Duration) {
        *self.get_delay.lock().unwrap() = Some(delay);
    }

    pub fn counts(&self, domain: &BizDomain, item_id: ItemId) -> Option<InteractionCounts> {
        self.state().counters.get(&(domain.clone(), item_id)).copied()
    }

    pub fn is_liked(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> bool {
        self.state()
            .likes
            .get(&(domain.clone(), item_id, user_id))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_collected(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> bool {
        self.state()
            .collects
            .contains_key(&(domain.clone(), item_id, user_id))
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InteractionStore for InteractionStoreStub {
    async fn inc_read(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.take_error()?;
        self.state().bump(domain, item_id, CounterField::Read, 1);
        Ok(())
    }

    async fn batch_inc_read(&self, domains: &[BizDomain], ids: &[ItemId]) -> Result<()> {
        self.take_error()?;
        if domains.len() != ids.len() {
            return Err(DomainError::Validation {
                field: "ids",
                reason: "domains and ids must have the same length".into(),
            });
        }

        let failing_item = *self.failing_item.lock().unwrap();
        let mut state = self.state();

        // Copie de travail : rien n'est visible tant que le batch n'a pas entièrement réussi
        let mut working = state.clone();
        for (domain, item_id) in domains.iter().zip(ids) {
            if failing_item == Some(*item_id) {
                return Err(DomainError::Infrastructure(format!(
                    "simulated failure on item {item_id}"
                )));
            }
            working.bump(domain, *item_id, CounterField::Read, 1);
        }

        *state = working;
        Ok(())
    }

    async fn inc_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        self.take_error()?;
        let mut state = self.state();

        let liked = state.likes.entry((domain.clone(), item_id, user_id)).or_insert(false);
        if *liked {
            return Ok(false);
        }
        *liked = true;
        state.bump(domain, item_id, CounterField::Like, 1);
        Ok(true)
    }

    async fn dec_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        self.take_error()?;
        let mut state = self.state();

        match state.likes.get_mut(&(domain.clone(), item_id, user_id)) {
            Some(liked) if *liked => {
                *liked = false;
                state.bump(domain, item_id, CounterField::Like, -1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn inc_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        collection_id: CollectionId,
    ) -> Result<()> {
        self.take_error()?;
        let mut state = self.state();

        let key = (domain.clone(), item_id, user_id);
        if state.collects.contains_key(&key) {
            return Err(DomainError::AlreadyExists {
                entity: UserCollectRecord::entity_name(),
                field: "user_id",
                value: user_id.to_string(),
            });
        }
        state.collects.insert(key, collection_id);
        state.bump(domain, item_id, CounterField::Collect, 1);
        Ok(())
    }

    async fn dec_collect(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        self.take_error()?;
        let mut state = self.state();

        if state.collects.remove(&(domain.clone(), item_id, user_id)).is_none() {
            return Ok(false);
        }
        state.bump(domain, item_id, CounterField::Collect, -1);
        Ok(true)
    }

    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<InteractionCounter> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.get_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.take_error()?;

        self.counts(domain, item_id)
            .map(|counts| InteractionCounter::restore(domain.clone(), item_id, counts, 0, 0))
            .ok_or_else(|| InteractionCounter::not_found(format!("{domain}:{item_id}")))
    }

    async fn get_like_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserLikeStatus> {
        self.take_error()?;
        let liked = self
            .state()
            .likes
            .get(&(domain.clone(), item_id, user_id))
            .copied()
            .ok_or_else(|| UserLikeStatus::not_found(format!("{domain}:{item_id}:{user_id}")))?;

        Ok(UserLikeStatus {
            domain: domain.clone(),
            item_id,
            user_id,
            liked,
            created_at: 0,
            updated_at: 0,
        })
    }

    async fn get_collect_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserCollectRecord> {
        self.take_error()?;
        let collection_id = self
            .state()
            .collects
            .get(&(domain.clone(), item_id, user_id))
            .copied()
            .ok_or_else(|| UserCollectRecord::not_found(format!("{domain}:{item_id}:{user_id}")))?;

        Ok(UserCollectRecord {
            domain: domain.clone(),
            item_id,
            user_id,
            collection_id,
            created_at: 0,
            updated_at: 0,
        })
    }

    async fn get_by_ids(
        &self,
        domain: &BizDomain,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, InteractionCounter>> {
        self.take_error()?;
        let state = self.state();

        Ok(ids
            .iter()
            .filter_map(|id| {
                state.counters.get(&(domain.clone(), *id)).map(|counts| {
                    (*id, InteractionCounter::restore(domain.clone(), *id, *counts, 0, 0))
                })
            })
            .collect())
    }
}
