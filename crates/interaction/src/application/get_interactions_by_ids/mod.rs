mod get_interactions_by_ids_command;
mod get_interactions_by_ids_use_case;

pub use get_interactions_by_ids_command::GetInteractionsByIdsCommand;
pub use get_interactions_by_ids_use_case::GetInteractionsByIdsUseCase;
