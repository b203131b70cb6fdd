// crates/interaction/src/domain/repositories/interaction_cache.rs

use async_trait::async_trait;
use shared_kernel::errors::Result;

use crate::domain::value_objects::{BizDomain, CounterField, InteractionCounts, ItemId};

/// Projection des compteurs en cache. Aucune donnée par utilisateur.
#[async_trait]
pub trait InteractionCache: Send + Sync {
    /// `Ok(None)` = cache miss, jamais confondu avec un enregistrement à zéro
    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<Option<InteractionCounts>>;

    /// Remplace les trois compteurs d'un bloc
    async fn set(&self, domain: &BizDomain, item_id: ItemId, counts: &InteractionCounts) -> Result<()>;

    /// Applique `delta` à un seul champ, uniquement si la clé existe déjà (atomique).
    /// Renvoie `false` quand la clé est absente : elle n'est jamais créée.
    async fn apply_delta_if_present(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        field: CounterField,
        delta: i64,
    ) -> Result<bool>;

    async fn incr_read_if_present(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.apply_delta_if_present(domain, item_id, CounterField::Read, 1).await?;
        Ok(())
    }

    async fn incr_like_if_present(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.apply_delta_if_present(domain, item_id, CounterField::Like, 1).await?;
        Ok(())
    }

    async fn incr_collect_if_present(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.apply_delta_if_present(domain, item_id, CounterField::Collect, 1).await?;
        Ok(())
    }

    async fn decr_like(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.apply_delta_if_present(domain, item_id, CounterField::Like, -1).await?;
        Ok(())
    }

    async fn decr_collect(&self, domain: &BizDomain, item_id: ItemId) -> Result<()> {
        self.apply_delta_if_present(domain, item_id, CounterField::Collect, -1).await?;
        Ok(())
    }
}
