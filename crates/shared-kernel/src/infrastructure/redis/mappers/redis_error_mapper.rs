// crates/shared-kernel/src/infrastructure/redis/mappers/redis_error_mapper.rs

use fred::error::{Error as FredError, ErrorKind};

use crate::errors::DomainError;

pub trait FredErrorExt<T> {
    fn map_cache_err(self, operation: &'static str) -> Result<T, DomainError>;
}

impl<T> FredErrorExt<T> for std::result::Result<T, FredError> {
    fn map_cache_err(self, operation: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| match e.kind() {
            ErrorKind::Timeout => DomainError::Timeout { operation },
            _ => DomainError::Infrastructure(format!("{operation}: {e}")),
        })
    }
}
