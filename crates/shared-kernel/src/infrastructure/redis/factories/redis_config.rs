// crates/shared-kernel/src/infrastructure/redis/factories/redis_config.rs

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub max_clients: usize,
    pub connection_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            max_clients: 16,
            connection_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Lit `{prefix}_MAX_CLIENTS`
    pub fn from_env(prefix: &str) -> Self {
        let defaults = Self::default();

        Self {
            max_clients: std::env::var(format!("{prefix}_MAX_CLIENTS"))
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_clients),
            ..defaults
        }
    }
}
