// crates/interaction/src/domain/value_objects/collection_id.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

/// Dossier de collection cible. 0 = dossier par défaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CollectionId(i64);

impl CollectionId {
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

    pub fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for CollectionId {
    fn validate(&self) -> Result<()> {
        if self.0 < 0 {
            return Err(DomainError::Validation {
                field: "collection_id",
                reason: format!("collection id cannot be negative (got {})", self.0),
            });
        }
        Ok(())
    }
}

impl TryFrom<i64> for CollectionId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<CollectionId> for i64 {
    fn from(id: CollectionId) -> Self {
        id.0
    }
}
