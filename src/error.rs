//! Error types for Cirrus.

use thiserror::Error;

/// Common error type for Cirrus.
#[derive(Error, Debug)]
pub enum CirrusError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from any database
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Session token error (missing, malformed, forged, or expired).
    #[error("token error: {0}")]
    Token(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unique constraint collision (e.g. an already registered email).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Blob store failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for CirrusError {
    fn from(e: sqlx::Error) -> Self {
        CirrusError::Database(e.to_string())
    }
}

/// Result type alias for Cirrus operations.
pub type Result<T> = std::result::Result<T, CirrusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = CirrusError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_token_error_display() {
        let err = CirrusError::Token("expired".to_string());
        assert_eq!(err.to_string(), "token error: expired");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CirrusError::Validation("name must not be empty".to_string());
        assert_eq!(err.to_string(), "validation error: name must not be empty");
    }

    #[test]
    fn test_duplicate_error_display() {
        let err = CirrusError::Duplicate("email already registered".to_string());
        assert_eq!(err.to_string(), "duplicate: email already registered");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = CirrusError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_storage_error_display() {
        let err = CirrusError::Storage("upload rejected".to_string());
        assert_eq!(err.to_string(), "storage error: upload rejected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CirrusError = io_err.into();
        assert!(matches!(err, CirrusError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(CirrusError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
