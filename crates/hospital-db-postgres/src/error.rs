//! Error types for the PostgreSQL backend.

use hospital_storage::StorageError;
use sqlx_core::error::Error as SqlxError;

/// PostgreSQL error code for undefined function/procedure (42883).
pub const PG_UNDEFINED_FUNCTION: &str = "42883";

/// Checks if a sqlx error has a specific PostgreSQL error code.
pub fn has_pg_error_code(err: &SqlxError, code: &str) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.code().as_deref() == Some(code)
    } else {
        false
    }
}

/// Checks if a sqlx error is "undefined function" (42883), which is what a
/// missing stored procedure looks like.
pub fn is_undefined_function(err: &SqlxError) -> bool {
    has_pg_error_code(err, PG_UNDEFINED_FUNCTION)
}

/// Errors specific to the PostgreSQL backend.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Error reported by sqlx: pool, I/O, protocol or database.
    #[error("{0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Sqlx(e) => match &e {
                SqlxError::Database(_) => StorageError::query(e.to_string()),
                SqlxError::ColumnDecode { .. }
                | SqlxError::ColumnIndexOutOfBounds { .. }
                | SqlxError::ColumnNotFound(_)
                | SqlxError::Decode(_)
                | SqlxError::TypeNotFound { .. } => StorageError::decode(e.to_string()),
                SqlxError::PoolTimedOut
                | SqlxError::PoolClosed
                | SqlxError::Io(_)
                | SqlxError::Tls(_)
                | SqlxError::Configuration(_)
                | SqlxError::Protocol(_)
                | SqlxError::WorkerCrashed => StorageError::connection(e.to_string()),
                _ => StorageError::internal(e.to_string()),
            },
            PostgresError::Config { message } => {
                StorageError::internal(format!("Configuration error: {message}"))
            }
        }
    }
}

/// Result type alias for PostgreSQL operations.
pub type Result<T> = std::result::Result<T, PostgresError>;
