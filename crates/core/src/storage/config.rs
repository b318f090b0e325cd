//! Storage configuration types.

use folio_shared::config::StorageSettings;

/// Storage service configuration.
#[derive(Clone)]
pub struct StorageConfig {
    /// AWS access key ID.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
    /// AWS region.
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Path prepended to every generated key.
    pub prefix: String,
    /// Custom S3 endpoint. `None` uses the regional AWS endpoint.
    pub endpoint: Option<String>,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[hidden]")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("endpoint", &self.endpoint)
            .field("max_file_size", &self.max_file_size)
            .finish()
    }
}

impl StorageConfig {
    /// Default region.
    pub const DEFAULT_REGION: &'static str = "ap-northeast-2";
    /// Default bucket.
    pub const DEFAULT_BUCKET: &'static str =
        "amplify-d1jx5u7u0ebuxt-ma-amplifydataamplifycodege-0fxenzrmrqkf";
    /// Default key prefix.
    pub const DEFAULT_PREFIX: &'static str = "joohoonkim/portfolio/";
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a config with the given credentials and default location.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: Self::DEFAULT_REGION.to_string(),
            bucket: Self::DEFAULT_BUCKET.to_string(),
            prefix: Self::DEFAULT_PREFIX.to_string(),
            endpoint: None,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Build the config from loaded settings, filling unset fields with the
    /// defaults.
    ///
    /// Returns `None` when no access key is set.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        let access_key_id = settings.access_key.as_deref().filter(|v| !v.is_empty())?;
        let secret_access_key = settings.secret_access_key.clone().unwrap_or_default();

        let mut config = Self::new(access_key_id, secret_access_key);
        if let Some(region) = &settings.region {
            config.region.clone_from(region);
        }
        if let Some(bucket) = &settings.bucket_name {
            config.bucket.clone_from(bucket);
        }
        if let Some(prefix) = &settings.prefix {
            config.prefix.clone_from(prefix);
        }
        if let Some(max_file_size) = settings.max_file_size {
            config.max_file_size = max_file_size;
        }
        config.endpoint = settings.endpoint.clone().filter(|v| !v.is_empty());
        Some(config)
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the bucket.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set a custom endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Virtual-hosted bucket host, e.g. `bucket.s3.ap-northeast-2.amazonaws.com`.
    #[must_use]
    pub fn public_host(&self) -> String {
        format!("{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::new("key", "secret");
        assert_eq!(config.region, "ap-northeast-2");
        assert_eq!(config.bucket, StorageConfig::DEFAULT_BUCKET);
        assert_eq!(config.prefix, "joohoonkim/portfolio/");
        assert!(config.endpoint.is_none());
        assert_eq!(config.max_file_size, StorageConfig::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_public_host() {
        let config = StorageConfig::new("key", "secret")
            .with_bucket("assets")
            .with_region("us-east-1");
        assert_eq!(config.public_host(), "assets.s3.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", StorageConfig::new("key", "top-secret"));
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn test_from_settings_without_access_key() {
        assert!(StorageConfig::from_settings(&StorageSettings::default()).is_none());

        let blank = StorageSettings {
            access_key: Some(String::new()),
            ..Default::default()
        };
        assert!(StorageConfig::from_settings(&blank).is_none());
    }

    #[test]
    fn test_from_settings_overrides() {
        let settings = StorageSettings {
            access_key: Some("AKIA".to_string()),
            secret_access_key: Some("shh".to_string()),
            region: Some("eu-west-1".to_string()),
            bucket_name: Some("folio-assets".to_string()),
            endpoint: Some(String::new()),
            max_file_size: Some(1024),
            ..Default::default()
        };

        let config = StorageConfig::from_settings(&settings).expect("config");

        assert_eq!(config.access_key_id, "AKIA");
        assert_eq!(config.secret_access_key, "shh");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.bucket, "folio-assets");
        assert_eq!(config.prefix, StorageConfig::DEFAULT_PREFIX);
        assert!(config.endpoint.is_none());
        assert_eq!(config.max_file_size, 1024);
    }
}
