// crates/interaction/src/domain/models/interaction.rs

use serde::{Deserialize, Serialize};

use crate::domain::entities::InteractionCounter;
use crate::domain::value_objects::{BizDomain, InteractionCounts, ItemId};

/// Vue exposée à la couche transport : compteurs + état de l'utilisateur courant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub domain: BizDomain,
    pub item_id: ItemId,
    #[serde(flatten)]
    pub counts: InteractionCounts,
    pub liked: bool,
    pub collected: bool,
}

impl Interaction {
    pub fn from_counts(domain: BizDomain, item_id: ItemId, counts: InteractionCounts) -> Self {
        Self {
            domain,
            item_id,
            counts,
            liked: false,
            collected: false,
        }
    }

    pub fn with_user_state(mut self, liked: bool, collected: bool) -> Self {
        self.liked = liked;
        self.collected = collected;
        self
    }
}

impl From<InteractionCounter> for Interaction {
    fn from(counter: InteractionCounter) -> Self {
        Self::from_counts(counter.domain().clone(), counter.item_id(), counter.counts())
    }
}
