use thiserror::Error;

use crate::dto::{DtoError, FieldMessage};
use crate::repository::RepositoryError;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain-level failures surfaced by the catalog services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("{0}")]
    ResourceNotFound(String),
    /// The store refused a change that would break referential integrity.
    #[error("{0}")]
    DatabaseIntegrityViolation(String),
    /// The caller supplied invalid input.
    #[error("validation failed")]
    Validation(Vec<FieldMessage>),
    /// Any other persistence failure, passed through unchanged.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::ResourceNotFound(message.into())
    }

    pub fn validation(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![FieldMessage::new(field_name, message)])
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::not_found("Entity not found"),
            RepositoryError::IntegrityViolation(message) => {
                ServiceError::DatabaseIntegrityViolation(message)
            }
            other => ServiceError::Repository(other),
        }
    }
}

impl From<DtoError> for ServiceError {
    fn from(value: DtoError) -> Self {
        ServiceError::Validation(value.field_messages())
    }
}
