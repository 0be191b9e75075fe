use sqlx::Error as SqlxError;
use thiserror::Error;

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

impl RepositoryError {
    /// Maps a unique-constraint violation to `AlreadyExists`, leaving every
    /// other database error as `Sqlx`.
    pub fn from_write(err: SqlxError, what: impl Into<String>) -> Self {
        match &err {
            SqlxError::Database(db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(what.into())
            }
            SqlxError::RowNotFound => RepositoryError::NotFound,
            _ => RepositoryError::Sqlx(err),
        }
    }
}
