mod collect_item_command;
mod collect_item_use_case;

pub use collect_item_command::CollectItemCommand;
pub use collect_item_use_case::CollectItemUseCase;
