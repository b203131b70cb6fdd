// crates/shared-kernel/src/infrastructure/memory/mod.rs

mod in_memory_message_stream;

pub use in_memory_message_stream::{InMemoryMessageSender, InMemoryMessageStream};
