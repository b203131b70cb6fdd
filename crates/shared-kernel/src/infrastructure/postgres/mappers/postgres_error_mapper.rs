// crates/shared-kernel/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use crate::domain::entities::EntityMetadata;
use crate::errors::DomainError;
use sqlx::postgres::PgDatabaseError;

const UNIQUE_VIOLATION: &str = "23505";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

pub trait SqlxErrorExt<T> {
    /// Traduit l'erreur sqlx en erreur métier de l'entité `E`
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError>;
    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError>;
}

impl<T> SqlxErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError> {
        self.map_err(|e| match e {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                entity: E::entity_name(),
                id: "unknown".into(),
            },
            sqlx::Error::PoolTimedOut => DomainError::Timeout {
                operation: "postgres.acquire",
            },
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();

                match code.as_deref() {
                    Some(UNIQUE_VIOLATION) => {
                        let field = db_err
                            .try_downcast_ref::<PgDatabaseError>()
                            .and_then(|pg| pg.constraint())
                            .map(E::map_constraint_to_field)
                            .unwrap_or("unique_constraint");

                        DomainError::AlreadyExists {
                            entity: E::entity_name(),
                            field,
                            value: "already taken".into(),
                        }
                    }
                    Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => {
                        DomainError::ConcurrencyConflict {
                            reason: format!("Concurrent write on {}", E::entity_name()),
                        }
                    }
                    _ => DomainError::Infrastructure(db_err.message().into()),
                }
            }
            other => DomainError::Infrastructure(other.to_string()),
        })
    }

    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{context}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl EntityMetadata for Probe {
        fn entity_name() -> &'static str {
            "Probe"
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let result: Result<(), DomainError> = Err::<(), _>(sqlx::Error::RowNotFound).map_domain::<Probe>();

        assert!(matches!(result, Err(DomainError::NotFound { entity: "Probe", .. })));
    }

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let result: Result<(), DomainError> = Err::<(), _>(sqlx::Error::PoolTimedOut).map_domain::<Probe>();

        assert!(result.unwrap_err().is_timeout());
    }

    #[test]
    fn test_infra_context_is_kept() {
        let result: Result<(), DomainError> =
            Err::<(), _>(sqlx::Error::PoolClosed).map_domain_infra("batch_inc_read");

        match result {
            Err(DomainError::Infrastructure(msg)) => assert!(msg.starts_with("batch_inc_read")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
