// crates/shared-kernel/src/application/ports/message_producer.rs

use crate::errors::AppResult;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRecord {
    pub key: Option<String>,
    pub payload: Vec<u8>,
}

#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publie un payload déjà sérialisé vers `topic`.
    async fn publish(&self, topic: &str, record: &OutgoingRecord) -> AppResult<()>;

    /// Publie un lot de payloads. Important pour Kafka afin de maximiser le débit.
    async fn publish_batch(&self, topic: &str, records: &[OutgoingRecord]) -> AppResult<()>;
}
