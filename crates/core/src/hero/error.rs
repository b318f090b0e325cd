//! Hero content error types.

use thiserror::Error;

/// Hero content operation errors.
#[derive(Debug, Error)]
pub enum HeroError {
    /// No record with this id.
    #[error("hero content not found: {0}")]
    NotFound(i32),

    /// A concurrent write activated another record first.
    #[error("conflicting hero content write: {0}")]
    Conflict(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl HeroError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: i32) -> Self {
        Self::NotFound(id)
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
