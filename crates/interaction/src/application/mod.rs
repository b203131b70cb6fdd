// crates/interaction/src/application/mod.rs

pub mod cancel_collect;
pub mod cancel_like;
pub mod collect_item;
pub mod get_interaction;
pub mod get_interactions_by_ids;
pub mod increment_read;
pub mod like_item;
pub mod record_reads;
