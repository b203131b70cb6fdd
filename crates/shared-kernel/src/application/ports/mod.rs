mod message_consumer;
mod message_producer;

pub use message_consumer::{BatchHandler, IncomingMessage, MessageHandler, MessageStream};
pub use message_producer::{MessageProducer, OutgoingRecord};
