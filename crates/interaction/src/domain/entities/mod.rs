// crates/interaction/src/domain/entities/mod.rs

mod interaction_counter;
mod user_collect_record;
mod user_like_status;

pub use interaction_counter::InteractionCounter;
pub use user_collect_record::UserCollectRecord;
pub use user_like_status::UserLikeStatus;
