mod record_reads_command;
mod record_reads_use_case;

pub use record_reads_command::RecordReadsCommand;
pub use record_reads_use_case::RecordReadsUseCase;

#[cfg(test)]
mod record_reads_use_case_test;
