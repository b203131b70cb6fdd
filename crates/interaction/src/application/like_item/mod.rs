mod like_item_command;
mod like_item_use_case;

pub use like_item_command::LikeItemCommand;
pub use like_item_use_case::LikeItemUseCase;
