// crates/shared-kernel/src/infrastructure/kafka/kafka_message_producer.rs

use async_trait::async_trait;
use futures::future::try_join_all;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::Duration;

use crate::application::ports::{MessageProducer, OutgoingRecord};
use crate::errors::{AppError, AppResult, ErrorCode};

pub struct KafkaMessageProducer {
    producer: FutureProducer,
    send_timeout: Duration,
}

impl KafkaMessageProducer {
    pub fn new(brokers: &str) -> AppResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("compression.type", "snappy")
            .set("acks", "all")
            .set("linger.ms", "10")
            .set("batch.num.messages", "1000")
            .create()
            .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, format!("Kafka config error: {e}")))?;

        Ok(Self {
            producer,
            send_timeout: Duration::from_secs(5),
        })
    }

    fn record<'a>(topic: &'a str, record: &'a OutgoingRecord) -> FutureRecord<'a, String, Vec<u8>> {
        let future_record = FutureRecord::to(topic).payload(&record.payload);
        match &record.key {
            Some(key) => future_record.key(key),
            None => future_record,
        }
    }
}

#[async_trait]
impl MessageProducer for KafkaMessageProducer {
    async fn publish(&self, topic: &str, record: &OutgoingRecord) -> AppResult<()> {
        self.producer
            .send(Self::record(topic, record), self.send_timeout)
            .await
            .map_err(|(e, _)| AppError::from(e))?;

        Ok(())
    }

    async fn publish_batch(&self, topic: &str, records: &[OutgoingRecord]) -> AppResult<()> {
        // Tous les envois sont en vol en même temps, puis on attend les accusés
        let deliveries = records
            .iter()
            .map(|record| self.producer.send(Self::record(topic, record), self.send_timeout));

        try_join_all(deliveries)
            .await
            .map_err(|(e, _)| AppError::from(e))?;

        tracing::debug!(topic, count = records.len(), "Kafka batch published");
        Ok(())
    }
}
