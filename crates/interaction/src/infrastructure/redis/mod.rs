// crates/interaction/src/infrastructure/redis/mod.rs

mod redis_interaction_cache;

pub use redis_interaction_cache::RedisInteractionCache;
