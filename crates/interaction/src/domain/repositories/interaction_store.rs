// crates/interaction/src/domain/repositories/interaction_store.rs

use async_trait::async_trait;
use shared_kernel::errors::Result;
use std::collections::HashMap;

use crate::domain::entities::{InteractionCounter, UserCollectRecord, UserLikeStatus};
use crate::domain::value_objects::{BizDomain, CollectionId, ItemId, UserId};

/// Source de vérité des compteurs et des états par utilisateur.
///
/// Les mutations de like / collecte renvoient un drapeau `applied` : `false` signifie que
/// l'appel a réussi sans modifier le compteur (déjà aimé, rien à annuler...).
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Upsert : crée la ligne avec read = 1 ou incrémente. Non dédupliqué par utilisateur.
    async fn inc_read(&self, domain: &BizDomain, item_id: ItemId) -> Result<()>;

    /// `inc_read` pour chaque paire (domains[i], ids[i]) dans une seule transaction (tout ou rien)
    async fn batch_inc_read(&self, domains: &[BizDomain], ids: &[ItemId]) -> Result<()>;

    async fn inc_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool>;

    async fn dec_like(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool>;

    /// Échoue en `AlreadyExists` si l'utilisateur a déjà collecté l'item
    async fn inc_collect(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
        collection_id: CollectionId,
    ) -> Result<()>;

    async fn dec_collect(&self, domain: &BizDomain, item_id: ItemId, user_id: UserId) -> Result<bool>;

    /// `NotFound` si l'item n'a encore aucune interaction
    async fn get(&self, domain: &BizDomain, item_id: ItemId) -> Result<InteractionCounter>;

    async fn get_like_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserLikeStatus>;

    async fn get_collect_info(
        &self,
        domain: &BizDomain,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<UserCollectRecord>;

    /// Les ids sans ligne sont absents du résultat (pas de zéros fabriqués)
    async fn get_by_ids(
        &self,
        domain: &BizDomain,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, InteractionCounter>>;
}
