mod increment_read_command;
mod increment_read_use_case;

pub use increment_read_command::IncrementReadCommand;
pub use increment_read_use_case::IncrementReadUseCase;

#[cfg(test)]
mod increment_read_use_case_test;
