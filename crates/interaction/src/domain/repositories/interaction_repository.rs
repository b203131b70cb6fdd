// crates/interaction/src/domain/repositories/interaction_repository.rs

use async_trait::async_trait;
use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::collections::HashMap;

use crate::domain::models::Interaction;
use crate::domain::value_objects::{BizDomain, CollectionId, ItemId, UserId};

/// Façade Store + Cache consommée par les use cases.
/// Chaque appel est borné par la deadline de l'appelant.
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn inc_read(&self, domain: &BizDomain, item_id: ItemId, deadline: Deadline) -> Result<()>;

    /// Ne touche pas au cache : les compteurs de lecture en cache peuvent rester en retard
    async fn batch_inc_read(
        &self,
        domains: &[BizDomain],
        ids: &[ItemId],
        deadline: Deadline,
    ) -> Result<()>;

    async fn inc_like(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool>;

    async fn dec_like(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool>;

    async fn inc_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        collection_id: CollectionId,
        deadline: Deadline,
    ) -> Result<()>;

    async fn dec_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool>;

    /// Compteurs seuls (`liked` / `collected` à false). `NotFound` si l'item n'a aucune interaction.
    async fn get(&self, domain: &BizDomain, item_id: ItemId, deadline: Deadline) -> Result<Interaction>;

    async fn get_like_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool>;

    async fn get_collect_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        deadline: Deadline,
    ) -> Result<bool>;

    async fn get_by_ids(
        &self,
        domain: &BizDomain,
        ids: &[ItemId],
        deadline: Deadline,
    ) -> Result<HashMap<ItemId, Interaction>>;
}
