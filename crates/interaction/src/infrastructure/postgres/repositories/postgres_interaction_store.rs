// crates/interaction/src/infrastructure/postgres/repositories/postgres_interaction_store.rs

use async_trait::async_trait;
use shared_kernel::clock::Clock;
use shared_kernel::domain::entities::{EntityMetadata, EntityOptionExt};
use shared_kernel::errors::{DomainError, Result};
use shared_kernel::infrastructure::postgres::mappers::SqlxErrorExt;
use shared_kernel::infrastructure::retry::{with_retry, RetryConfig};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{InteractionCounter, UserCollectRecord, UserLikeStatus};
use crate::domain::repositories::InteractionStore;
use crate::domain::value_objects::{BizDomain, CollectionId, CounterField, ItemId, UserId};
use crate::infrastructure::postgres::rows::{
    PostgresCollectRecordRow, PostgresInteractionCounterRow, PostgresLikeStatusRow,
};

const COUNTER_COLUMNS: &str = "biz, biz_id, read_cnt, like_cnt, collect_cnt, created_at, updated_at";

pub struct PostgresInteractionStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    retry: RetryConfig,
}

impl PostgresInteractionStore {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Upsert : crée la ligne avec `field` = 1, ou incrémente atomiquement
    async fn increment(
        conn: &mut PgConnection,
        domain: &BizDomain,
        item_id: ItemId,
        field: CounterField,
        now: i64,
    ) -> Result<()> {
        let column = field.field_name();
        let sql = format!(
            "INSERT INTO interaction_counters (biz, biz_id, {column}, created_at, updated_at)
             VALUES ($1, $2, 1, $3, $3)
             ON CONFLICT (biz, biz_id) DO UPDATE
             SET {column} = interaction_counters.{column} + 1, updated_at = EXCLUDED.updated_at"
        );

        sqlx::query(&sql)
            .bind(domain.as_str())
            .bind(item_id.as_i64())
            .bind(now)
            .execute(conn)
            .await
            .map_domain::<InteractionCounter>()?;

        Ok(())
    }

    async fn decrement(
        conn: &mut PgConnection,
        domain: &BizDomain,
        item_id: ItemId,
        field: CounterField,
        now: i64,
    ) -> Result<()> {
        let column = field.field_name();
        let sql = format!(
            "UPDATE interaction_counters
             SET {column} = GREATEST({column} - 1, 0), updated_at = $3
             WHERE biz = $1 AND biz_id = $2"
        );

        sqlx::query(&sql)
            .bind(domain.as_str())
            .bind(item_id.as_i64())
            .bind(now)
            .execute(conn)
            .await
            .map_domain::<InteractionCounter>()?;

        Ok(())
    }

    async fn try_inc_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        let now = self.clock.now_millis();
        let mut tx = self.pool.begin().await.map_domain::<UserLikeStatus>()?;

        // Verrou exclusif sur la ligne de statut : sérialise les toggles d'un même utilisateur
        let current: Option<bool> = sqlx::query_scalar(
            "SELECT status FROM user_like_statuses
             WHERE biz = $1 AND biz_id = $2 AND uid = $3
             FOR UPDATE",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&mut *tx)
        .await
        .map_domain::<UserLikeStatus>()?;

        match current {
            Some(true) => return Ok(false),
            Some(false) => {
                sqlx::query(
                    "UPDATE user_like_statuses SET status = TRUE, updated_at = $4
                     WHERE biz = $1 AND biz_id = $2 AND uid = $3",
                )
                .bind(domain.as_str())
                .bind(item_id.as_i64())
                .bind(user_id.as_i64())
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_domain::<UserLikeStatus>()?;
            }
            None => {
                let inserted = sqlx::query(
                    "INSERT INTO user_like_statuses (biz, biz_id, uid, status, created_at, updated_at)
                     VALUES ($1, $2, $3, TRUE, $4, $4)
                     ON CONFLICT (biz, biz_id, uid) DO NOTHING",
                )
                .bind(domain.as_str())
                .bind(item_id.as_i64())
                .bind(user_id.as_i64())
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_domain::<UserLikeStatus>()?;

                // Un premier like concurrent a gagné la course : on rejoue pour lire son statut
                if inserted.rows_affected() == 0 {
                    return Err(DomainError::ConcurrencyConflict {
                        reason: format!("concurrent first like on {domain}:{item_id} by {user_id}"),
                    });
                }
            }
        }

        Self::increment(&mut tx, domain, item_id, CounterField::Like, now).await?;
        tx.commit().await.map_domain::<InteractionCounter>()?;

        Ok(true)
    }
}

#[async_trait]
impl InteractionStore for PostgresInteractionStore {
    async fn inc_read(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_domain::<InteractionCounter>()?;
        Self::increment(&mut conn, domain, item_id, CounterField::Read, self.clock.now_millis()).await
    }

    async fn batch_inc_read(&self, domains: &[BizDomain], ids: &[ItemId]) -> Result<()> {
        if domains.len() != ids.len() {
            return Err(DomainError::Validation {
                field: "ids",
                reason: format!(
                    "got {} domains for {} ids, both lists must have the same length",
                    domains.len(),
                    ids.len()
                ),
            });
        }
        if ids.is_empty() {
            return Ok(());
        }

        let now = self.clock.now_millis();
        let mut tx = self.pool.begin().await.map_domain::<InteractionCounter>()?;

        // Une erreur abandonne `tx` : rollback de tout le batch
        for (domain, item_id) in domains.iter().zip(ids) {
            Self::increment(&mut tx, domain, *item_id, CounterField::Read, now).await?;
        }

        tx.commit().await.map_domain::<InteractionCounter>()?;
        Ok(())
    }

    async fn inc_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        with_retry("inc_like", self.retry, move || self.try_inc_like(domain, item_id, user_id)).await
    }

    async fn dec_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        let now = self.clock.now_millis();
        let mut tx = self.pool.begin().await.map_domain::<UserLikeStatus>()?;

        let current: Option<bool> = sqlx::query_scalar(
            "SELECT status FROM user_like_statuses
             WHERE biz = $1 AND biz_id = $2 AND uid = $3
             FOR UPDATE",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&mut *tx)
        .await
        .map_domain::<UserLikeStatus>()?;

        // Rien à annuler
        if current != Some(true) {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE user_like_statuses SET status = FALSE, updated_at = $4
             WHERE biz = $1 AND biz_id = $2 AND uid = $3",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_domain::<UserLikeStatus>()?;

        Self::decrement(&mut tx, domain, item_id, CounterField::Like, now).await?;
        tx.commit().await.map_domain::<InteractionCounter>()?;

        Ok(true)
    }

    async fn inc_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        collection_id: CollectionId,
    ) -> Result<()> {
        let now = self.clock.now_millis();
        let mut tx = self.pool.begin().await.map_domain::<UserCollectRecord>()?;

        // Pas de ON CONFLICT : une double collecte remonte en AlreadyExists (23505)
        sqlx::query(
            "INSERT INTO user_collect_records (biz, biz_id, uid, collection_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .bind(collection_id.as_i64())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_domain::<UserCollectRecord>()?;

        Self::increment(&mut tx, domain, item_id, CounterField::Collect, now).await?;
        tx.commit().await.map_domain::<InteractionCounter>()?;

        Ok(())
    }

    async fn dec_collect(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool> {
        let now = self.clock.now_millis();
        let mut tx = self.pool.begin().await.map_domain::<UserCollectRecord>()?;

        let deleted = sqlx::query(
            "DELETE FROM user_collect_records WHERE biz = $1 AND biz_id = $2 AND uid = $3",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_domain::<UserCollectRecord>()?;

        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        Self::decrement(&mut tx, domain, item_id, CounterField::Collect, now).await?;
        tx.commit().await.map_domain::<InteractionCounter>()?;

        Ok(true)
    }

    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<InteractionCounter> {
        let sql = format!(
            "SELECT {COUNTER_COLUMNS} FROM interaction_counters WHERE biz = $1 AND biz_id = $2"
        );

        let row = sqlx::query_as::<_, PostgresInteractionCounterRow>(&sql)
            .bind(domain.as_str())
            .bind(item_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_domain::<InteractionCounter>()?;

        row.map(InteractionCounter::from)
            .ok_or_not_found(format!("{domain}:{item_id}"))
    }

    async fn get_like_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserLikeStatus> {
        let row = sqlx::query_as::<_, PostgresLikeStatusRow>(
            "SELECT biz, biz_id, uid, status, created_at, updated_at
             FROM user_like_statuses
             WHERE biz = $1 AND biz_id = $2 AND uid = $3",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_domain::<UserLikeStatus>()?;

        row.map(UserLikeStatus::from)
            .ok_or_not_found(format!("{domain}:{item_id}:{user_id}"))
    }

    async fn get_collect_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserCollectRecord> {
        let row = sqlx::query_as::<_, PostgresCollectRecordRow>(
            "SELECT biz, biz_id, uid, collection_id, created_at, updated_at
             FROM user_collect_records
             WHERE biz = $1 AND biz_id = $2 AND uid = $3",
        )
        .bind(domain.as_str())
        .bind(item_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_domain::<UserCollectRecord>()?;

        row.map(UserCollectRecord::from)
            .ok_or_not_found(format!("{domain}:{item_id}:{user_id}"))
    }

    async fn get_by_ids(
        &self,
        domain: &BizDomain,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, InteractionCounter>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(ItemId::as_i64).collect();
        let sql = format!(
            "SELECT {COUNTER_COLUMNS} FROM interaction_counters WHERE biz = $1 AND biz_id = ANY($2)"
        );

        let rows = sqlx::query_as::<_, PostgresInteractionCounterRow>(&sql)
            .bind(domain.as_str())
            .bind(raw_ids)
            .fetch_all(&self.pool)
            .await
            .map_domain::<InteractionCounter>()?;

        Ok(rows
            .into_iter()
            .map(InteractionCounter::from)
            .map(|counter| (counter.item_id(), counter))
            .collect())
    }
}
