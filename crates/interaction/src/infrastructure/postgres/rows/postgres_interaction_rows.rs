// crates/interaction/src/infrastructure/postgres/rows/postgres_interaction_rows.rs

use shared_kernel::domain::value_objects::Counter;
use sqlx::FromRow;

use crate::domain::entities::{InteractionCounter, UserCollectRecord, UserLikeStatus};
use crate::domain::value_objects::{BizDomain, CollectionId, InteractionCounts, ItemId, UserId};

#[derive(FromRow, Debug)]
pub struct PostgresInteractionCounterRow {
    pub biz: String,
    pub biz_id: i64,
    pub read_cnt: i64,
    pub like_cnt: i64,
    pub collect_cnt: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<PostgresInteractionCounterRow> for InteractionCounter {
    fn from(row: PostgresInteractionCounterRow) -> Self {
        InteractionCounter::restore(
            BizDomain::from_raw(row.biz),
            ItemId::from_raw(row.biz_id),
            InteractionCounts {
                read: Counter::from_raw(row.read_cnt),
                like: Counter::from_raw(row.like_cnt),
                collect: Counter::from_raw(row.collect_cnt),
            },
            row.created_at,
            row.updated_at,
        )
    }
}

#[derive(FromRow, Debug)]
pub struct PostgresLikeStatusRow {
    pub biz: String,
    pub biz_id: i64,
    pub uid: i64,
    pub status: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<PostgresLikeStatusRow> for UserLikeStatus {
    fn from(row: PostgresLikeStatusRow) -> Self {
        Self {
            domain: BizDomain::from_raw(row.biz),
            item_id: ItemId::from_raw(row.biz_id),
            user_id: UserId::from_raw(row.uid),
            liked: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow, Debug)]
pub struct PostgresCollectRecordRow {
    pub biz: String,
    pub biz_id: i64,
    pub uid: i64,
    pub collection_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<PostgresCollectRecordRow> for UserCollectRecord {
    fn from(row: PostgresCollectRecordRow) -> Self {
        Self {
            domain: BizDomain::from_raw(row.biz),
            item_id: ItemId::from_raw(row.biz_id),
            user_id: UserId::from_raw(row.uid),
            collection_id: CollectionId::from_raw(row.collection_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
