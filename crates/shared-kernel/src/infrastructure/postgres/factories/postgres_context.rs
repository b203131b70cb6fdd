// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_context.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::postgres::factories::{PostgresConfig, PostgresContextBuilder};

pub struct PostgresContext {
    pool: PgPool,
    url: String,
    config: PostgresConfig,
}

impl PostgresContext {
    /// Builder initialisé depuis `{prefix}_URL` et les variables de pool associées
    pub fn builder(prefix: &str) -> AppResult<PostgresContextBuilder> {
        PostgresContextBuilder::from_env(prefix)
    }

    pub fn builder_raw() -> PostgresContextBuilder {
        PostgresContextBuilder::default()
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    pub(crate) async fn restore(builder: PostgresContextBuilder) -> AppResult<Self> {
        let PostgresContextBuilder { url, config } = builder;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect(&url)
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::InfrastructureFailure,
                    format!("Postgres connection failed: {e}"),
                )
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Postgres pool ready"
        );

        Ok(Self { pool, url, config })
    }
}
