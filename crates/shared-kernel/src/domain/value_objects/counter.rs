// crates/shared_kernel/src/domain/value_objects/counter.rs

use crate::domain::value_objects::ValueObject;
use crate::errors::{DomainError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter(u64);

impl Counter {
    pub fn try_new(val: i64) -> Result<Self> {
        let raw = u64::try_from(val).map_err(|_| DomainError::Validation {
            field: "counter",
            reason: format!("counter cannot be negative (got {val})"),
        })?;
        let counter = Self(raw);
        counter.validate()?;
        Ok(counter)
    }

    /// Pour la reconstruction depuis la DB ou le cache.
    /// Une valeur négative (dérive d'un HINCRBY -1) est ramenée à 0.
    pub fn from_raw(val: i64) -> Self {
        Self(val.max(0) as u64)
    }

    /// Incrément sécurisé contre l'overflow (Saturating)
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Décrément sécurisé (ne descendra jamais sous 0)
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Applique un delta signé, borné à [0, u64::MAX]
    pub fn apply_delta(&mut self, delta: i64) {
        if delta >= 0 {
            self.0 = self.0.saturating_add(delta as u64);
        } else {
            self.0 = self.0.saturating_sub(delta.unsigned_abs());
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Représentation pour les colonnes BIGINT et les champs de hash Redis
    pub fn as_i64(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Counter {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl From<Counter> for u64 {
    fn from(counter: Counter) -> Self {
        counter.0
    }
}

impl From<u64> for Counter {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_never_goes_below_zero() {
        let mut counter = Counter::default();
        counter.decrement();
        assert!(counter.is_zero());
    }

    #[test]
    fn test_apply_negative_delta_saturates() {
        let mut counter = Counter::from(2);
        counter.apply_delta(-5);
        assert_eq!(counter.value(), 0);

        counter.apply_delta(3);
        assert_eq!(counter.value(), 3);
    }

    #[test]
    fn test_negative_raw_value_is_clamped() {
        assert_eq!(Counter::from_raw(-1).value(), 0);
        assert!(Counter::try_new(-1).is_err());
        assert_eq!(Counter::try_new(7).unwrap().value(), 7);
    }
}
