// crates/interaction/src/infrastructure/redis/redis_interaction_cache.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::redis::mappers::FredErrorExt;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::repositories::InteractionCache;
use crate::domain::value_objects::{BizDomain, CounterField, InteractionCounts, ItemId};

const KEY_PREFIX: &str = "interactive";

/// N'incrémente que si la clé existe déjà : un miss ne crée jamais de hash partiel.
/// Le champ est ramené à 0 s'il passe sous zéro.
const APPLY_DELTA_IF_PRESENT: &str = r#"
if redis.call("EXISTS", KEYS[1]) == 1 then
    local value = redis.call("HINCRBY", KEYS[1], ARGV[1], ARGV[2])
    if value < 0 then
        redis.call("HSET", KEYS[1], ARGV[1], 0)
    end
    return 1
end
return 0
"#;

/// Écrit les trois compteurs d'un coup, TTL optionnel en secondes (0 = pas d'expiration)
const SET_COUNTS: &str = r#"
redis.call("HSET", KEYS[1], "read_cnt", ARGV[1], "like_cnt", ARGV[2], "collect_cnt", ARGV[3])
if tonumber(ARGV[4]) > 0 then
    redis.call("EXPIRE", KEYS[1], ARGV[4])
end
return 1
"#;

pub struct RedisInteractionCache {
    pool: Pool,
    ttl: Option<Duration>,
}

impl RedisInteractionCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool, ttl: None }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl.filter(|ttl| !ttl.is_zero());
        self
    }

    /// Lit `INTERACTION_CACHE_TTL_SECS`, absent ou 0 = pas d'expiration
    pub fn ttl_from_env() -> Option<Duration> {
        std::env::var("INTERACTION_CACHE_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn key(domain: &BizDomain, item_id: ItemId) -> String {
        format!("{KEY_PREFIX}:{domain}:{item_id}")
    }

    fn counts_from_hash(hash: &HashMap<String, i64>) -> Option<InteractionCounts> {
        if hash.is_empty() {
            return None;
        }

        let field = |field: CounterField| {
            hash.get(field.field_name())
                .copied()
                .unwrap_or(0)
                .max(0) as u64
        };

        Some(InteractionCounts::new(
            field(CounterField::Read),
            field(CounterField::Like),
            field(CounterField::Collect),
        ))
    }
}

#[async_trait]
impl InteractionCache for RedisInteractionCache {
    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<Option<InteractionCounts>> {
        let hash: HashMap<String, i64> = self
            .pool
            .hgetall(Self::key(domain, item_id))
            .await
            .map_cache_err("cache.get")?;

        Ok(Self::counts_from_hash(&hash))
    }

    async fn set(&self, domain: &BizDomain, item_id: ItemId, counts: &InteractionCounts) -> Result<()> {
        let ttl_secs = self.ttl.map(|ttl| ttl.as_secs().max(1)).unwrap_or(0);
        let args = vec![
            counts.get(CounterField::Read).as_i64().to_string(),
            counts.get(CounterField::Like).as_i64().to_string(),
            counts.get(CounterField::Collect).as_i64().to_string(),
            ttl_secs.to_string(),
        ];

        self.pool
            .eval::<i64, _, _, _>(SET_COUNTS, vec![Self::key(domain, item_id)], args)
            .await
            .map_cache_err("cache.set")?;

        Ok(())
    }

    async fn apply_delta_if_present(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        field: CounterField,
        delta: i64,
    ) -> Result<bool> {
        let applied: i64 = self
            .pool
            .eval(
                APPLY_DELTA_IF_PRESENT,
                vec![Self::key(domain, item_id)],
                vec![field.field_name().to_string(), delta.to_string()],
            )
            .await
            .map_cache_err("cache.apply_delta")?;

        Ok(applied == 1)
    }
}
