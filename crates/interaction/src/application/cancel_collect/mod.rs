mod cancel_collect_command;
mod cancel_collect_use_case;

pub use cancel_collect_command::CancelCollectCommand;
pub use cancel_collect_use_case::CancelCollectUseCase;
