//! Repository Module
//!
//! Free async functions over a `SqlitePool`, one module per table.
//! Every read filters `is_deleted = 0` unless the function name says
//! `with_deleted`. Absence is `Ok(None)` / `false`, never an error.

pub mod contribution;
pub mod eligibility;
pub mod employer;
pub mod member;
pub mod transaction_log;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique index violated (racing insert or stale pre-check)
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Pool exhausted or closed, or the database file is unreachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepoError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Store unavailable");
                AppError::unavailable()
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        let err: RepoError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, RepoError::Unavailable(_)));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn test_database_errors_hide_detail() {
        let app: AppError = RepoError::Database("disk I/O error at page 7".into()).into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert_eq!(app.message, "Internal server error");
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let app: AppError = RepoError::Duplicate("UNIQUE constraint failed".into()).into();
        assert!(app.is_conflict());
    }
}
