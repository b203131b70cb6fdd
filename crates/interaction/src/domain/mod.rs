// crates/interaction/src/domain/mod.rs

pub mod entities;
pub mod events;
pub mod models;
pub mod repositories;
pub mod value_objects;
