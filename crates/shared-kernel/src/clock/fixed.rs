// crates/shared-kernel/src/clock/fixed.rs

use crate::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Horloge pilotable pour les tests
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            now: Mutex::new(DateTime::from_timestamp_millis(millis).unwrap_or_default()),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::milliseconds(millis);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
