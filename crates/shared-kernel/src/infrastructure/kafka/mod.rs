// crates/shared-kernel/src/infrastructure/kafka/mod.rs

mod kafka_config;
mod kafka_message_producer;
mod kafka_message_stream;

pub use kafka_config::KafkaConfig;
pub use kafka_message_producer::KafkaMessageProducer;
pub use kafka_message_stream::KafkaMessageStream;
