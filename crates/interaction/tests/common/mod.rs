// crates/interaction/tests/common/mod.rs

#![allow(dead_code)]

use interaction::infrastructure::postgres::repositories::PostgresInteractionStore;
use interaction::infrastructure::redis::RedisInteractionCache;
use shared_kernel::clock::SystemClock;
use shared_kernel::infrastructure::postgres::utils::PostgresTestContext;
use shared_kernel::infrastructure::redis::utils::RedisTestContext;
use std::sync::Arc;

pub const MIGRATIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/postgres");

pub async fn setup_postgres() -> PostgresTestContext {
    PostgresTestContext::builder()
        .with_migrations(&[MIGRATIONS])
        .build()
        .await
}

pub async fn setup_redis() -> RedisTestContext {
    RedisTestContext::builder().build().await
}

pub fn store(ctx: &PostgresTestContext) -> PostgresInteractionStore {
    PostgresInteractionStore::new(ctx.pool(), Arc::new(SystemClock))
}

pub fn cache(ctx: &RedisTestContext) -> RedisInteractionCache {
    RedisInteractionCache::new(ctx.pool())
}
