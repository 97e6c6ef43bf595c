use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures reported by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the requested identifier.
    #[error("record not found")]
    NotFound,
    /// The store rejected the statement because of a foreign key.
    #[error("integrity constraint violated: {0}")]
    IntegrityViolation(String),
    /// The store rejected the statement because of a unique key.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(DieselError),
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                RepositoryError::IntegrityViolation(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict(info.message().to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err = RepositoryError::from(DieselError::NotFound);

        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn foreign_key_violation_maps_to_integrity_violation() {
        let err = RepositoryError::from(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("FOREIGN KEY constraint failed".to_string()),
        ));

        match err {
            RepositoryError::IntegrityViolation(message) => {
                assert_eq!(message, "FOREIGN KEY constraint failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_errors_are_kept_unchanged() {
        let err = RepositoryError::from(DieselError::RollbackTransaction);

        assert!(matches!(
            err,
            RepositoryError::Database(DieselError::RollbackTransaction)
        ));
    }
}
