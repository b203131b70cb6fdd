mod get_interaction_command;
mod get_interaction_use_case;

pub use get_interaction_command::GetInteractionCommand;
pub use get_interaction_use_case::GetInteractionUseCase;

#[cfg(test)]
mod get_interaction_use_case_test;
