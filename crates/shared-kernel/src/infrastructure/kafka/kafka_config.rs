// crates/shared-kernel/src/infrastructure/kafka/kafka_config.rs

use crate::errors::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaConfig {
    pub brokers: String,
    pub group_id: String,
    pub session_timeout_ms: u32,
}

impl KafkaConfig {
    pub fn new(brokers: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            group_id: group_id.into(),
            session_timeout_ms: 45_000,
        }
    }

    /// `KAFKA_BROKERS` est obligatoire, le groupe est lu dans `group_var` (défaut `default_group`)
    pub fn from_env(group_var: &str, default_group: &str) -> AppResult<Self> {
        let brokers = std::env::var("KAFKA_BROKERS")
            .map_err(|_| AppError::new(ErrorCode::ValidationFailed, "KAFKA_BROKERS must be set"))?;

        let group_id = std::env::var(group_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default_group.to_string());

        Ok(Self::new(brokers, group_id))
    }
}
