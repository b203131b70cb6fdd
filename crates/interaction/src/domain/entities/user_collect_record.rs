// crates/interaction/src/domain/entities/user_collect_record.rs

use shared_kernel::domain::entities::EntityMetadata;

use crate::domain::value_objects::{BizDomain, CollectionId, ItemId, UserId};

/// Trace de collecte. Une seule par (domaine, item, utilisateur) : une seconde collecte est un conflit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCollectRecord {
    pub domain: BizDomain,
    pub item_id: ItemId,
    pub user_id: UserId,
    pub collection_id: CollectionId,
    pub created_at: i64,
    pub updated_at: i64,
}

impl EntityMetadata for UserCollectRecord {
    fn entity_name() -> &'static str {
        "UserCollectRecord"
    }

    fn map_constraint_to_field(constraint: &str) -> &'static str {
        match constraint {
            "uq_user_collect_biz_item_user" => "user_id",
            _ => "unique_constraint",
        }
    }
}
