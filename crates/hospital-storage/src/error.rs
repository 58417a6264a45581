//! Storage error types for the procedure storage layer.

use std::fmt;

/// Errors that can occur while calling a stored procedure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// Could not obtain a connection to the database.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// The procedure call itself failed inside the database.
    #[error("Query error: {message}")]
    Query {
        /// Description of the query error.
        message: String,
    },

    /// A result row did not match the declared column layout.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Query` error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Query { .. } => ErrorCategory::Procedure,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection or pool failure.
    Infrastructure,
    /// The stored procedure raised an error.
    Procedure,
    /// Row shape mismatch.
    Decode,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Procedure => write!(f, "procedure"),
            Self::Decode => write!(f, "decode"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::connection("pool timed out");
        assert_eq!(err.to_string(), "Connection error: pool timed out");

        let err = StorageError::query("patient 9 does not exist");
        assert_eq!(err.to_string(), "Query error: patient 9 does not exist");

        let err = StorageError::decode("column 0 is NULL");
        assert_eq!(err.to_string(), "Decode error: column 0 is NULL");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::connection("x").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(StorageError::query("x").category(), ErrorCategory::Procedure);
        assert_eq!(StorageError::decode("x").category(), ErrorCategory::Decode);
        assert_eq!(StorageError::internal("x").category().to_string(), "internal");
    }
}
