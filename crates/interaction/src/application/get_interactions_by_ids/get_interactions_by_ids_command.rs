// crates/interaction/src/application/get_interactions_by_ids/get_interactions_by_ids_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::{DomainError, Result};

use crate::domain::value_objects::{BizDomain, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetInteractionsByIdsCommand {
    pub domain: BizDomain,
    pub ids: Vec<ItemId>,
}

impl GetInteractionsByIdsCommand {
    pub const MAX_IDS: usize = 100;

    /// Les doublons sont retirés avant le contrôle de taille
    pub fn try_new(domain: impl Into<String>, ids: Vec<i64>) -> Result<Self> {
        let mut ids = ids
            .into_iter()
            .map(ItemId::try_new)
            .collect::<Result<Vec<_>>>()?;
        ids.sort_unstable();
        ids.dedup();

        if ids.len() > Self::MAX_IDS {
            return Err(DomainError::Validation {
                field: "ids",
                reason: format!("at most {} ids per call, got {}", Self::MAX_IDS, ids.len()),
            });
        }

        Ok(Self {
            domain: BizDomain::try_new(domain)?,
            ids,
        })
    }
}
