mod cancel_like_command;
mod cancel_like_use_case;

pub use cancel_like_command::CancelLikeCommand;
pub use cancel_like_use_case::CancelLikeUseCase;
