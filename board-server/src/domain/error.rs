use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("Post not found")]
    PostNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage unavailable")]
    StorageUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::InvalidId | Self::ValidationError(_) => 400,
            Self::PostNotFound => 404,
            Self::StorageUnavailable => 503,
            Self::DatabaseError(_) | Self::InternalError(_) => 500,
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::PostNotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Self::StorageUnavailable,
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(DomainError::InvalidId.to_status_code(), 400);
        assert_eq!(
            DomainError::ValidationError("pageSize".into()).to_status_code(),
            400
        );
        assert_eq!(DomainError::PostNotFound.to_status_code(), 404);
        assert_eq!(DomainError::StorageUnavailable.to_status_code(), 503);
        assert_eq!(
            DomainError::DatabaseError("boom".into()).to_status_code(),
            500
        );
    }

    #[test]
    fn pool_timeout_is_storage_unavailable() {
        let err = DomainError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DomainError::StorageUnavailable));

        let err = DomainError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::PostNotFound));
    }
}
