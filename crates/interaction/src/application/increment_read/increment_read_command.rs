// crates/interaction/src/application/increment_read/increment_read_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::Result;

use crate::domain::value_objects::{BizDomain, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementReadCommand {
    pub domain: BizDomain,
    pub item_id: ItemId,
}

impl IncrementReadCommand {
    pub fn try_new(domain: impl Into<String>, item_id: i64) -> Result<Self> {
        Ok(Self {
            domain: BizDomain::try_new(domain)?,
            item_id: ItemId::try_new(item_id)?,
        })
    }
}
