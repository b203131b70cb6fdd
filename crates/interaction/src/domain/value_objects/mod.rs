// crates/interaction/src/domain/value_objects/mod.rs

mod biz_domain;
mod collection_id;
mod counter_field;
mod interaction_counts;
mod item_id;
mod user_id;

pub use biz_domain::BizDomain;
pub use collection_id::CollectionId;
pub use counter_field::CounterField;
pub use interaction_counts::InteractionCounts;
pub use item_id::ItemId;
pub use user_id::UserId;
