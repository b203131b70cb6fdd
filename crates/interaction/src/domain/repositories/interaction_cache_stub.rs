// crates/interaction/src/domain/repositories/interaction_cache_stub.rs

use async_trait::async_trait;
use shared_kernel::errors::{DomainError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::repositories::InteractionCache;
use crate::domain::value_objects::{BizDomain, CounterField, InteractionCounts, ItemId};

#[derive(Default)]
pub struct InteractionCacheStub {
    pub entries: Mutex<HashMap<(BizDomain, ItemId), InteractionCounts>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub set_calls: AtomicUsize,
}

impl InteractionCacheStub {
    pub fn with_entry(self, domain: &BizDomain, item_id: ItemId, counts: InteractionCounts) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert((domain.clone(), item_id), counts);
        self
    }

    pub fn entry(&self, domain: &BizDomain, item_id: ItemId) -> Option<InteractionCounts> {
        self.entries
            .lock()
            .unwrap()
            .get(&(domain.clone(), item_id))
            .copied()
    }

    fn check(&self, flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::Infrastructure("simulated cache outage".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InteractionCache for InteractionCacheStub {
    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<Option<InteractionCounts>> {
        self.check(&self.fail_reads)?;
        Ok(self.entry(domain, item_id))
    }

    async fn set(&self, domain: &BizDomain, item_id: ItemId, counts: &InteractionCounts) -> Result<()> {
        self.check(&self.fail_writes)?;
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert((domain.clone(), item_id), *counts);
        Ok(())
    }

    async fn apply_delta_if_present(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        field: CounterField,
        delta: i64,
    ) -> Result<bool> {
        self.check(&self.fail_writes)?;
        let mut entries = self.entries.lock().unwrap();

        match entries.get_mut(&(domain.clone(), item_id)) {
            Some(counts) => {
                counts.apply_delta(field, delta);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
