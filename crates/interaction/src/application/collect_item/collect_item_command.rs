// crates/interaction/src/application/collect_item/collect_item_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::Result;

use crate::domain::value_objects::{BizDomain, CollectionId, ItemId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectItemCommand {
    pub domain: BizDomain,
    pub item_id: ItemId,
    pub user_id: UserId,
    /// 0 = dossier par défaut
    #[serde(default)]
    pub collection_id: CollectionId,
}

impl CollectItemCommand {
    pub fn try_new(
        domain: impl Into<String>,
        item_id: i64,
        user_id: i64,
        collection_id: i64,
    ) -> Result<Self> {
        Ok(Self {
            domain: BizDomain::try_new(domain)?,
            item_id: ItemId::try_new(item_id)?,
            user_id: UserId::try_new(user_id)?,
            collection_id: CollectionId::try_new(collection_id)?,
        })
    }
}
