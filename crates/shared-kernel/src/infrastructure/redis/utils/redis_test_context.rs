// crates/shared-kernel/src/infrastructure/redis/utils/redis_test_context.rs

use fred::clients::Pool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis as RedisImage;

use crate::infrastructure::redis::factories::RedisContext;
use crate::infrastructure::redis::utils::redis_test_builder::RedisTestContextBuilder;

pub struct RedisTestContext {
    context: RedisContext,
    _container: ContainerAsync<RedisImage>,
}

impl RedisTestContext {
    pub fn builder() -> RedisTestContextBuilder {
        RedisTestContextBuilder::new()
    }

    pub fn pool(&self) -> Pool {
        self.context.pool()
    }

    pub fn url(&self) -> &str {
        self.context.url()
    }

    pub(crate) async fn restore(builder: RedisTestContextBuilder) -> Self {
        let container = RedisImage::default()
            .with_tag(&builder.image_tag)
            .start()
            .await
            .expect("Failed to start Redis container");

        let host = container.get_host().await.expect("Redis host unavailable");
        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Redis port not exposed");
        let url = format!("redis://{host}:{port}");

        // builder_raw() : l'URL vient du container, pas de l'environnement
        let context = RedisContext::builder_raw()
            .with_url(&url)
            .with_config(builder.config)
            .build()
            .await
            .expect("Failed to build RedisContext for tests");

        Self {
            context,
            _container: container,
        }
    }
}
