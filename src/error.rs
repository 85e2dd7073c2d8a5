//! # Structured Error Handling
//!
//! One error enum for the whole crate. The four operation-level kinds map
//! 1:1 to how callers must react: `Validation` and `NotFound` are caller
//! mistakes, `Store` is fatal to the enclosing operation, and `Cache` is
//! swallowed everywhere except delete and list repopulation.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed create/update input. Never reaches either store.
    #[error("validation error: {0}")]
    Validation(String),

    /// No matching todo id in the primary store.
    #[error("todo not found: {id}")]
    NotFound { id: i64 },

    /// Primary store I/O failure.
    #[error("store error: {0}")]
    Store(String),

    /// Cache I/O or decode failure.
    #[error("cache error: {0}")]
    Cache(String),

    /// Configuration loading failure.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for TodoError {
    fn from(error: sqlx::Error) -> Self {
        TodoError::Store(error.to_string())
    }
}

impl From<redis::RedisError> for TodoError {
    fn from(error: redis::RedisError) -> Self {
        TodoError::Cache(error.to_string())
    }
}

impl From<config::ConfigError> for TodoError {
    fn from(error: config::ConfigError) -> Self {
        TodoError::Configuration(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TodoError::NotFound { id: 42 };
        assert_eq!(error.to_string(), "todo not found: 42");

        let error = TodoError::Validation("task cannot be empty".to_string());
        assert_eq!(error.to_string(), "validation error: task cannot be empty");
    }
}
