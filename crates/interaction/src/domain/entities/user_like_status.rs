// crates/interaction/src/domain/entities/user_like_status.rs

use shared_kernel::domain::entities::EntityMetadata;

use crate::domain::value_objects::{BizDomain, ItemId, UserId};

/// État "aime actuellement" d'un utilisateur pour un item. Basculé en place, jamais supprimé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLikeStatus {
    pub domain: BizDomain,
    pub item_id: ItemId,
    pub user_id: UserId,
    pub liked: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UserLikeStatus {
    pub fn is_liked(&self) -> bool {
        self.liked
    }
}

impl EntityMetadata for UserLikeStatus {
    fn entity_name() -> &'static str {
        "UserLikeStatus"
    }

    fn map_constraint_to_field(constraint: &str) -> &'static str {
        match constraint {
            "uq_user_like_biz_item_user" => "user_id",
            _ => "unique_constraint",
        }
    }
}
