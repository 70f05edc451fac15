use sqlx::Error as SqlxError;
use thiserror::Error;

/// Failures surfaced by the persistence layer. Unique-key violations are
/// lifted out of the sqlx error so services can answer 409 without
/// string-matching database messages.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Custom: {0}")]
    Custom(String),
}
