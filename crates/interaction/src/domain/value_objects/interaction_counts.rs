// crates/interaction/src/domain/value_objects/interaction_counts.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::Counter;

use crate::domain::value_objects::CounterField;

/// Projection des trois compteurs, seule donnée mise en cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionCounts {
    pub read: Counter,
    pub like: Counter,
    pub collect: Counter,
}

impl InteractionCounts {
    pub fn new(read: u64, like: u64, collect: u64) -> Self {
        Self {
            read: read.into(),
            like: like.into(),
            collect: collect.into(),
        }
    }

    pub fn get(&self, field: CounterField) -> Counter {
        match field {
            CounterField::Read => self.read,
            CounterField::Like => self.like,
            CounterField::Collect => self.collect,
        }
    }

    pub fn apply_delta(&mut self, field: CounterField, delta: i64) {
        let counter = match field {
            CounterField::Read => &mut self.read,
            CounterField::Like => &mut self.like,
            CounterField::Collect => &mut self.collect,
        };
        counter.apply_delta(delta);
    }
}
