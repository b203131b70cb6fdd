// crates/interaction/src/infrastructure/kafka/read_event_producer.rs

use shared_kernel::application::ports::{MessageProducer, OutgoingRecord};
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::kafka::{KafkaConfig, KafkaMessageProducer};
use std::sync::Arc;

use crate::domain::events::ReadEvent;

/// Publie les lectures sur le topic ; la clé (item id) garde les lectures d'un item
/// sur la même partition.
pub struct ReadEventProducer {
    producer: Arc<dyn MessageProducer>,
    topic: String,
}

impl ReadEventProducer {
    pub fn new(producer: Arc<dyn MessageProducer>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }

    /// Producteur Kafka sur `KAFKA_BROKERS`, topic `READ_EVENT_TOPIC` (défaut `read_event`)
    pub fn from_env() -> AppResult<Self> {
        let kafka = KafkaConfig::from_env("READ_CONSUMER_GROUP", "interaction")?;
        let topic = std::env::var("READ_EVENT_TOPIC").unwrap_or_else(|_| "read_event".into());
        let producer = KafkaMessageProducer::new(&kafka.brokers)?;

        Ok(Self::new(Arc::new(producer), topic))
    }

    fn record(event: &ReadEvent) -> AppResult<OutgoingRecord> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| AppError::internal(format!("read event serialization failed: {e}")))?;

        Ok(OutgoingRecord {
            key: Some(event.item_id.to_string()),
            payload,
        })
    }

    pub async fn publish(&self, event: &ReadEvent) -> AppResult<()> {
        self.producer.publish(&self.topic, &Self::record(event)?).await
    }

    pub async fn publish_batch(&self, events: &[ReadEvent]) -> AppResult<()> {
        if events.is_empty() {
            return Ok(());
        }

        let records = events
            .iter()
            .map(Self::record)
            .collect::<AppResult<Vec<_>>>()?;

        self.producer.publish_batch(&self.topic, &records).await
    }
}
