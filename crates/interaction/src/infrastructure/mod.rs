// crates/interaction/src/infrastructure/mod.rs

pub mod bootstrap;
pub mod kafka;
pub mod postgres;
pub mod redis;
pub mod repositories;
