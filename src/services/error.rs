use thiserror::Error;

/// Failure kinds raised by the ShareIt services.
///
/// The HTTP layer maps each variant to a status code; services only classify.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("user {id} not found"))
    }

    pub fn item_not_found(id: i64) -> Self {
        Self::NotFound(format!("item {id} not found"))
    }

    pub fn booking_not_found(id: i64) -> Self {
        Self::NotFound(format!("booking {id} not found"))
    }

    pub fn request_not_found(id: i64) -> Self {
        Self::NotFound(format!("item request {id} not found"))
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
