//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The provider rejected an upload.
    #[error("failed to upload file to S3: {code} - {message}")]
    Upload {
        /// Provider error code.
        code: String,
        /// Provider error message.
        message: String,
    },

    /// File size exceeds maximum allowed.
    #[error("file size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Wrap a provider failure during upload.
    #[must_use]
    pub fn upload(err: &opendal::Error) -> Self {
        Self::Upload {
            code: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
