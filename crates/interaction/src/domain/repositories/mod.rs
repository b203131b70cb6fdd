// crates/interaction/src/domain/repositories/mod.rs

mod interaction_cache;
mod interaction_repository;
mod interaction_store;

pub use interaction_cache::InteractionCache;
pub use interaction_repository::InteractionRepository;
pub use interaction_store::InteractionStore;

#[cfg(any(test, feature = "test-utils"))]
mod interaction_cache_stub;
#[cfg(any(test, feature = "test-utils"))]
mod interaction_store_stub;

#[cfg(any(test, feature = "test-utils"))]
pub use interaction_cache_stub::InteractionCacheStub;
#[cfg(any(test, feature = "test-utils"))]
pub use interaction_store_stub::InteractionStoreStub;
