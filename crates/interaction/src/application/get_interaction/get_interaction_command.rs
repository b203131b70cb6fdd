// crates/interaction/src/application/get_interaction/get_interaction_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::Result;

use crate::domain::value_objects::{BizDomain, ItemId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetInteractionCommand {
    pub domain: BizDomain,
    pub item_id: ItemId,
    /// Absent pour un visiteur anonyme : pas d'état liked / collected
    pub user_id: Option<UserId>,
}

impl GetInteractionCommand {
    pub fn try_new(domain: impl Into<String>, item_id: i64, user_id: Option<i64>) -> Result<Self> {
        Ok(Self {
            domain: BizDomain::try_new(domain)?,
            item_id: ItemId::try_new(item_id)?,
            user_id: user_id.map(UserId::try_new).transpose()?,
        })
    }
}
