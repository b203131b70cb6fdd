// crates/interaction/src/infrastructure/bootstrap/read_consumer.rs

use shared_kernel::application::ports::MessageStream;
use shared_kernel::application::workers::{BatchConfig, BatchProcessor, MessageProcessor};
use shared_kernel::clock::SystemClock;
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use shared_kernel::infrastructure::kafka::{KafkaConfig, KafkaMessageStream};
use shared_kernel::infrastructure::postgres::factories::PostgresContext;
use shared_kernel::infrastructure::redis::factories::RedisContext;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::record_reads::RecordReadsUseCase;
use crate::domain::repositories::InteractionRepository;
use crate::domain::value_objects::BizDomain;
use crate::infrastructure::kafka::{read_batch_handler, read_event_handler};
use crate::infrastructure::postgres::repositories::PostgresInteractionStore;
use crate::infrastructure::postgres::utils::run_interaction_postgres_migrations;
use crate::infrastructure::redis::RedisInteractionCache;
use crate::infrastructure::repositories::CachedInteractionRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerMode {
    Batch,
    Single,
}

impl ConsumerMode {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "batch" | "" => Ok(Self::Batch),
            "single" => Ok(Self::Single),
            other => Err(AppError::new(
                ErrorCode::ValidationFailed,
                format!("READ_CONSUMER_MODE must be 'batch' or 'single', got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadConsumerConfig {
    pub topic: String,
    pub domain: BizDomain,
    pub mode: ConsumerMode,
    pub single_timeout: Duration,
    pub batch: BatchConfig,
}

impl ReadConsumerConfig {
    pub fn from_env() -> AppResult<Self> {
        let topic = std::env::var("READ_EVENT_TOPIC").unwrap_or_else(|_| "read_event".into());
        let domain = BizDomain::try_new(
            std::env::var("READ_EVENT_DOMAIN").unwrap_or_else(|_| "article".into()),
        )?;
        let mode = ConsumerMode::parse(&std::env::var("READ_CONSUMER_MODE").unwrap_or_default())?;
        let single_timeout = std::env::var("READ_SINGLE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(1));

        Ok(Self {
            topic,
            domain,
            mode,
            single_timeout,
            batch: BatchConfig::from_env()?,
        })
    }
}

/// Relaie l'arrêt demandé par le binaire vers le token interne du processeur
fn link_shutdown(outer: CancellationToken, inner: CancellationToken) {
    tokio::spawn(async move {
        outer.cancelled().await;
        inner.cancel();
    });
}

pub async fn run_read_event_consumer(shutdown: CancellationToken) -> AppResult<()> {
    let config = ReadConsumerConfig::from_env()?;
    let kafka = KafkaConfig::from_env("READ_CONSUMER_GROUP", "interaction")?;

    tracing::info!(
        topic = %config.topic,
        domain = %config.domain,
        group = %kafka.group_id,
        mode = ?config.mode,
        "Starting read event consumer"
    );

    // 1. Infrastructure
    let postgres = PostgresContext::builder("INTERACTION_DB")?.build().await?;
    run_interaction_postgres_migrations(&postgres.pool())
        .await
        .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, format!("migrations failed: {e}")))?;
    let redis = RedisContext::builder("INTERACTION_REDIS")?.build().await?;

    // 2. Repository
    let store = Arc::new(PostgresInteractionStore::new(postgres.pool(), Arc::new(SystemClock)));
    let cache = Arc::new(
        RedisInteractionCache::new(redis.pool()).with_ttl(RedisInteractionCache::ttl_from_env()),
    );
    let repo: Arc<dyn InteractionRepository> = Arc::new(CachedInteractionRepository::new(store, cache));

    // 3. Flux
    let stream: Arc<dyn MessageStream> = Arc::new(KafkaMessageStream::subscribe(&kafka, &config.topic)?);

    match config.mode {
        ConsumerMode::Batch => {
            let use_case = Arc::new(RecordReadsUseCase::new(repo));
            let processor = BatchProcessor::new(
                stream,
                read_batch_handler(use_case, config.domain),
                config.batch,
            )?;
            link_shutdown(shutdown, processor.shutdown_token());
            processor.run().await
        }
        ConsumerMode::Single => {
            let use_case = Arc::new(RecordReadsUseCase::new(repo));
            let processor = MessageProcessor::new(
                stream,
                read_event_handler(use_case, config.domain),
                config.single_timeout,
                config.batch.retry_backoff,
            );
            link_shutdown(shutdown, processor.shutdown_token());
            processor.run().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ConsumerMode::parse("batch").unwrap(), ConsumerMode::Batch);
        assert_eq!(ConsumerMode::parse(" Single ").unwrap(), ConsumerMode::Single);
        assert_eq!(ConsumerMode::parse("").unwrap(), ConsumerMode::Batch);

        let err = ConsumerMode::parse("stream").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_linked_shutdown_cancels_processor_token() {
        let outer = CancellationToken::new();
        let inner = CancellationToken::new();
        link_shutdown(outer.clone(), inner.clone());

        outer.cancel();
        inner.cancelled().await;

        assert!(inner.is_cancelled());
    }
}
