// crates/interaction/src/domain/value_objects/item_id.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;

/// Identifiant de l'item dans son domaine métier (ex: id d'article)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ItemId(i64);

impl ItemId {
    pub fn try_new(value: i64) -> Result<Self> {
        let id = Self(value);
        id.validate()?;
        Ok(id)
    }

    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl ValueObject for ItemId {
    fn validate(&self) -> Result<()> {
        if self.0 <= 0 {
            return Err(DomainError::Validation {
                field: "item_id",
                reason: format!("item id must be positive (got {})", self.0),
            });
        }
        Ok(())
    }
}

impl TryFrom<i64> for ItemId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
