// crates/shared-kernel/src/infrastructure/postgres/utils/postgres_test_context.rs

use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;

use crate::infrastructure::postgres::factories::PostgresContext;
use crate::infrastructure::postgres::utils::{run_postgres_migrations, PostgresTestContextBuilder};

/// Postgres jetable pour les tests d'intégration. Le container vit aussi longtemps que le contexte.
pub struct PostgresTestContext {
    context: PostgresContext,
    _container: ContainerAsync<PostgresImage>,
}

impl PostgresTestContext {
    pub fn builder() -> PostgresTestContextBuilder {
        PostgresTestContextBuilder::new()
    }

    pub async fn restore(builder: PostgresTestContextBuilder) -> Self {
        let container = PostgresImage::default()
            .with_user(&builder.user)
            .with_password(&builder.password)
            .with_db_name(&builder.db_name)
            .with_tag(&builder.image_tag)
            .start()
            .await
            .expect("Failed to start Postgres container");

        let host_port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Postgres port not exposed");
        let url = format!(
            "postgres://{}:{}@127.0.0.1:{}/{}",
            builder.user, builder.password, host_port, builder.db_name
        );

        let mut context_builder = PostgresContext::builder_raw().with_url(&url);
        if let Some(config) = builder.config {
            context_builder = context_builder.with_config(config);
        }
        let context = context_builder
            .build()
            .await
            .expect("Failed to build Postgres context");

        for path in &builder.migrations {
            run_postgres_migrations(&context.pool(), path)
                .await
                .expect("Failed to apply migrations");
        }

        Self {
            context,
            _container: container,
        }
    }

    pub fn pool(&self) -> PgPool {
        self.context.pool()
    }

    pub fn url(&self) -> &str {
        self.context.url()
    }
}
