// crates/shared-kernel/src/application/workers/mod.rs

mod batch_processor;
mod message_processor;

pub use batch_processor::{BatchConfig, BatchProcessor};
pub use message_processor::MessageProcessor;
