// crates/interaction/src/infrastructure/kafka/mod.rs

mod read_event_handlers;
mod read_event_producer;

pub use read_event_handlers::{read_batch_handler, read_event_handler};
pub use read_event_producer::ReadEventProducer;
