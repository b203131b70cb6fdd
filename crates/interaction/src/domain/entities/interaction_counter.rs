// crates/interaction/src/domain/entities/interaction_counter.rs

use shared_kernel::domain::entities::EntityMetadata;

use crate::domain::value_objects::{BizDomain, InteractionCounts, ItemId};

/// Ligne de compteurs d'un item. Créée au premier événement (upsert), jamais supprimée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionCounter {
    domain: BizDomain,
    item_id: ItemId,
    counts: InteractionCounts,
    created_at: i64,
    updated_at: i64,
}

impl InteractionCounter {
    pub fn restore(
        domain: BizDomain,
        item_id: ItemId,
        counts: InteractionCounts,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            domain,
            item_id,
            counts,
            created_at,
            updated_at,
        }
    }

    pub fn domain(&self) -> &BizDomain {
        &self.domain
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn counts(&self) -> InteractionCounts {
        self.counts
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }
}

impl EntityMetadata for InteractionCounter {
    fn entity_name() -> &'static str {
        "InteractionCounter"
    }

    fn map_constraint_to_field(constraint: &str) -> &'static str {
        match constraint {
            "uq_interaction_counters_biz_item" => "item_id",
            _ => "unique_constraint",
        }
    }
}
