// crates/shared-kernel/src/infrastructure/redis/mod.rs

pub mod factories;
pub mod mappers;
pub mod utils;
