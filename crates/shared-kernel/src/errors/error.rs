// crates/shared-kernel/src/errors/error.rs

use thiserror::Error;
use crate::errors::{AppError, ErrorCode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("{entity} not found with id '{id}'")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Violation d'une clé unique (ex: double collecte d'un même item)
    #[error("{entity} already exists with {field} = '{value}'")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Deux écritures concurrentes se sont croisées (ex: premier like en double)
    #[error("Concurrency conflict: {reason}")]
    ConcurrencyConflict {
        reason: String,
    },

    /// Échec définitif après plusieurs tentatives de retry
    #[error("Operation failed after maximum retries: {0}")]
    TooManyConflicts(String),

    /// La deadline fournie par l'appelant est écoulée
    #[error("Operation '{operation}' timed out")]
    Timeout {
        operation: &'static str,
    },

    /// Erreur liée à l'infrastructure (DB, Kafka, Redis)
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),

    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Utilisé par la boucle de Retry
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::NotFound => DomainError::NotFound {
                entity: "Resource",
                id: "unknown".into(),
            },
            ErrorCode::Timeout => DomainError::Timeout { operation: "remote" },
            _ => DomainError::Internal(err.message),
        }
    }
}
