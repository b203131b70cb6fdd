// crates/shared-kernel/src/infrastructure/mod.rs

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "kafka")]
pub mod kafka;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "concurrency")]
pub mod concurrency;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub mod retry;
