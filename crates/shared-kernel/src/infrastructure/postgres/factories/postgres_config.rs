// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_config.rs

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(3),
        }
    }
}

impl PostgresConfig {
    /// Lit `{prefix}_MAX_CONNECTIONS`, `{prefix}_MIN_CONNECTIONS` et `{prefix}_CONNECT_TIMEOUT` (secondes)
    pub fn from_env(prefix: &str) -> Self {
        let defaults = Self::default();

        Self {
            max_connections: std::env::var(format!("{prefix}_MAX_CONNECTIONS"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: std::env::var(format!("{prefix}_MIN_CONNECTIONS"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
            connect_timeout: std::env::var(format!("{prefix}_CONNECT_TIMEOUT"))
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
        }
    }
}
