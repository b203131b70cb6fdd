// crates/interaction/src/utils/mod.rs

mod message_producer_stub;

pub use message_producer_stub::MessageProducerStub;

use std::sync::Arc;

use crate::domain::repositories::{InteractionCacheStub, InteractionStoreStub};
use crate::infrastructure::repositories::CachedInteractionRepository;

/// Repository réel branché sur les stubs, pour tester les use cases de bout en bout
pub struct InteractionTestContext {
    pub store: Arc<InteractionStoreStub>,
    pub cache: Arc<InteractionCacheStub>,
    pub repo: Arc<CachedInteractionRepository>,
}

impl InteractionTestContext {
    pub fn new() -> Self {
        Self::with(InteractionStoreStub::default(), InteractionCacheStub::default())
    }

    pub fn with(store: InteractionStoreStub, cache: InteractionCacheStub) -> Self {
        let store = Arc::new(store);
        let cache = Arc::new(cache);
        let repo = Arc::new(CachedInteractionRepository::new(store.clone(), cache.clone()));

        Self { store, cache, repo }
    }
}

impl Default for InteractionTestContext {
    fn default() -> Self {
        Self::new()
    }
}
