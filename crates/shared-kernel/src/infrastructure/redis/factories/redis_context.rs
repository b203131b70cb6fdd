// crates/shared-kernel/src/infrastructure/redis/factories/redis_context.rs

use fred::clients::Pool;
use fred::prelude::*;
use fred::types::Builder;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};

pub struct RedisContext {
    pool: Pool,
    url: String,
    config: RedisConfig,
}

impl RedisContext {
    /// Builder initialisé depuis `{prefix}_URL` et `{prefix}_MAX_CLIENTS`
    pub fn builder(prefix: &str) -> AppResult<RedisContextBuilder> {
        RedisContextBuilder::from_env(prefix)
    }

    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    /// Le pool fred est un handle partagé : le cloner ne crée pas de connexion
    pub fn pool(&self) -> Pool {
        self.pool.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    pub(crate) async fn restore(builder: RedisContextBuilder) -> AppResult<Self> {
        let RedisContextBuilder { url, config } = builder;
        let failure = |e: fred::error::Error| {
            AppError::new(
                ErrorCode::InfrastructureFailure,
                format!("Failed to connect to Redis at {url}: {e}"),
            )
        };

        let fred_config = Config::from_url(&url).map_err(failure)?;
        let connection_timeout = config.connection_timeout;
        let command_timeout = config.command_timeout;

        let pool = Builder::from_config(fred_config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = connection_timeout;
                cfg.internal_command_timeout = command_timeout;
                cfg.max_command_attempts = 3;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(config.max_clients)
            .map_err(failure)?;

        pool.init().await.map_err(failure)?;
        pool.wait_for_connect().await.map_err(failure)?;

        tracing::info!(max_clients = config.max_clients, "Redis pool ready");

        Ok(Self { pool, url, config })
    }
}
