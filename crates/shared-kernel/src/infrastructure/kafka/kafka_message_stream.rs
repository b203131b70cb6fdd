// crates/shared-kernel/src/infrastructure/kafka/kafka_message_stream.rs

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::{Offset, TopicPartitionList};
use std::collections::HashMap;
use std::time::Duration;

use crate::application::ports::{IncomingMessage, MessageStream};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::kafka::KafkaConfig;

const SEEK_TIMEOUT: Duration = Duration::from_secs(5);

/// Flux Kafka à commit manuel : aucun offset n'avance sans appel explicite à `commit`.
pub struct KafkaMessageStream {
    consumer: StreamConsumer,
}

impl KafkaMessageStream {
    pub fn subscribe(config: &KafkaConfig, topic: &str) -> AppResult<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "false")
            .set("enable.auto.offset.store", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", config.session_timeout_ms.to_string())
            .set("max.poll.interval.ms", "300000")
            .create()?;

        consumer
            .subscribe(&[topic])
            .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, e.to_string()))?;

        tracing::info!(topic, group_id = %config.group_id, "Kafka stream subscribed");

        Ok(Self { consumer })
    }

    /// Offset extrême par (topic, partition) selon `pick`
    fn positions(
        messages: &[IncomingMessage],
        pick: fn(i64, i64) -> i64,
    ) -> HashMap<(&str, i32), i64> {
        let mut positions: HashMap<(&str, i32), i64> = HashMap::new();
        for message in messages {
            positions
                .entry((message.topic.as_str(), message.partition))
                .and_modify(|offset| *offset = pick(*offset, message.offset))
                .or_insert(message.offset);
        }
        positions
    }
}

#[async_trait]
impl MessageStream for KafkaMessageStream {
    async fn next_message(&self) -> AppResult<Option<IncomingMessage>> {
        let message = self.consumer.recv().await?;

        Ok(Some(IncomingMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
        }))
    }

    async fn commit(&self, messages: &[IncomingMessage]) -> AppResult<()> {
        if messages.is_empty() {
            return Ok(());
        }

        // Kafka attend l'offset du prochain message à lire
        let mut tpl = TopicPartitionList::new();
        for ((topic, partition), offset) in Self::positions(messages, i64::max) {
            tpl.add_partition_offset(topic, partition, Offset::Offset(offset + 1))?;
        }

        self.consumer.commit(&tpl, CommitMode::Async)?;
        Ok(())
    }

    async fn rewind(&self, messages: &[IncomingMessage]) -> AppResult<()> {
        // Retour au premier message non acquitté de chaque partition
        for ((topic, partition), offset) in Self::positions(messages, i64::min) {
            self.consumer
                .seek(topic, partition, Offset::Offset(offset), SEEK_TIMEOUT)?;
        }
        Ok(())
    }
}
