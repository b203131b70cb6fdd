// crates/interaction/src/infrastructure/bootstrap/mod.rs

mod read_consumer;

pub use read_consumer::{run_read_event_consumer, ConsumerMode, ReadConsumerConfig};
