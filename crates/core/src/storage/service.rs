//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Operator, services};
use tracing::{error, info};

use super::config::StorageConfig;
use super::error::StorageError;
use super::key::generate_unique_key;

/// Content type used when the client did not send one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Name used for key generation when the client sent no file name.
const DEFAULT_FILE_NAME: &str = "file";

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name, if the client sent one.
    pub file_name: Option<String>,
    /// MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Uploads and deletes site assets in one bucket.
///
/// Built once at startup and shared; holds no global state.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a service talking to S3.
    ///
    /// # Errors
    ///
    /// Returns an error if the S3 operator cannot be built.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint(endpoint);
        }

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self { operator, config })
    }

    /// Create a service over an existing operator, e.g. an in-memory one.
    #[must_use]
    pub fn with_operator(operator: Operator, config: StorageConfig) -> Self {
        Self { operator, config }
    }

    /// Build the full object key for a generated name.
    ///
    /// Format: `{prefix}{folder}/{name}`, or `{prefix}{name}` when `folder` is empty.
    #[must_use]
    pub fn object_key(&self, folder: &str, name: &str) -> String {
        if folder.is_empty() {
            format!("{}{name}", self.config.prefix)
        } else {
            format!("{}{folder}/{name}", self.config.prefix)
        }
    }

    /// Public URL of an object key. No I/O.
    #[must_use]
    pub fn build_url(&self, key: &str) -> String {
        format!("https://{}/{key}", self.config.public_host())
    }

    /// Recover the object key from a URL produced by [`Self::build_url`].
    ///
    /// Returns `None` if the URL does not point into this bucket.
    #[must_use]
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let host_prefix = format!("{}/", self.config.public_host());
        url.split_once(&host_prefix)
            .map(|(_, key)| key)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    /// Upload a file under `folder` and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` before contacting the provider if the file is
    /// over the limit, and `Upload` with the provider's code and message if
    /// the write fails.
    pub async fn upload(&self, file: FileUpload, folder: &str) -> Result<String, StorageError> {
        let size = file.data.len() as u64;
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(size, self.config.max_file_size));
        }

        let name = generate_unique_key(file.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME));
        let key = self.object_key(folder, &name);
        let content_type = content_type_or_default(file.content_type);

        let mut write = self.operator.write_with(&key, file.data);
        if self.operator.info().full_capability().write_with_content_type {
            write = write.content_type(&content_type);
        }

        if let Err(e) = write.await {
            error!(
                error = %e,
                bucket = %self.config.bucket,
                region = %self.config.region,
                key = %key,
                "S3 upload failed"
            );
            return Err(StorageError::upload(&e));
        }

        info!(key = %key, size, content_type = %content_type, "File uploaded");
        Ok(self.build_url(&key))
    }

    /// Delete the object behind `url`.
    ///
    /// Returns false without contacting the provider if the URL is not in this
    /// bucket. Provider failures are logged and reported as false.
    pub async fn delete(&self, url: &str) -> bool {
        let Some(key) = self.key_from_url(url) else {
            return false;
        };

        match self.operator.delete(&key).await {
            Ok(()) => {
                info!(key = %key, "File deleted");
                true
            }
            Err(e) => {
                error!(error = %e, key = %key, "Error deleting file from S3");
                false
            }
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

fn content_type_or_default(content_type: Option<String>) -> String {
    content_type
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Building a URL and extracting the key again is the identity.
    proptest! {
        #[test]
        fn prop_url_key_round_trip(key in "[a-zA-Z0-9_./-]{1,80}") {
            let config = StorageConfig::new("key", "secret");
            let operator = Operator::new(services::Memory::default())
                .expect("memory operator")
                .finish();
            let service = StorageService::with_operator(operator, config);

            let url = service.build_url(&key);
            prop_assert_eq!(service.key_from_url(&url), Some(key));
        }
    }
}
