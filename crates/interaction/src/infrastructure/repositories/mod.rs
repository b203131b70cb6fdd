// crates/interaction/src/infrastructure/repositories/mod.rs

mod cache_warmer;
mod cached_interaction_repository;

pub use cache_warmer::{CacheWarmer, CacheWarmerStats};
pub use cached_interaction_repository::CachedInteractionRepository;
