//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Administrator credentials.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Object storage for uploads.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Administrator account used by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Login name.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Argon2id PHC hash of the admin password. Login is disabled when unset.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password_hash: None,
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

/// Object storage settings. Unset fields fall back to the storage defaults;
/// uploads are disabled without an access key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// AWS access key ID.
    pub access_key: Option<String>,
    /// AWS secret access key.
    pub secret_access_key: Option<String>,
    /// AWS region.
    pub region: Option<String>,
    /// Bucket name.
    pub bucket_name: Option<String>,
    /// Path prepended to every generated key.
    pub prefix: Option<String>,
    /// Custom S3 endpoint.
    pub endpoint: Option<String>,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: Option<u64>,
}

impl StorageSettings {
    /// Reads the conventional `AWS_ACCESS_KEY`, `AWS_SECRET_ACCESS_KEY`,
    /// `AWS_REGION`, `S3_BUCKET_NAME`, `S3_PREFIX`, `S3_ENDPOINT` and
    /// `S3_MAX_FILE_SIZE` variables.
    fn from_conventional_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("AWS")
                    .prefix_separator("_")
                    .ignore_empty(true),
            )
            .add_source(
                config::Environment::with_prefix("S3")
                    .prefix_separator("_")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Keeps every field that is set and takes the rest from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            access_key: self.access_key.or(fallback.access_key),
            secret_access_key: self.secret_access_key.or(fallback.secret_access_key),
            region: self.region.or(fallback.region),
            bucket_name: self.bucket_name.or(fallback.bucket_name),
            prefix: self.prefix.or(fallback.prefix),
            endpoint: self.endpoint.or(fallback.endpoint),
            max_file_size: self.max_file_size.or(fallback.max_file_size),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// The `[storage]` section can also be set through the conventional AWS
    /// and S3 variables, which take precedence over files and `FOLIO__STORAGE__*`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.storage = StorageSettings::from_conventional_env()?.or(app.storage);
        Ok(app)
    }
}
