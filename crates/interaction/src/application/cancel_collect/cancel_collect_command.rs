// crates/interaction/src/application/cancel_collect/cancel_collect_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::Result;

use crate::domain::value_objects::{BizDomain, ItemId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelCollectCommand {
    pub domain: BizDomain,
    pub item_id: ItemId,
    pub user_id: UserId,
}

impl CancelCollectCommand {
    pub fn try_new(domain: impl Into<String>, item_id: i64, user_id: i64) -> Result<Self> {
        Ok(Self {
            domain: BizDomain::try_new(domain)?,
            item_id: ItemId::try_new(item_id)?,
            user_id: UserId::try_new(user_id)?,
        })
    }
}
