//! Folio API Server
//!
//! Serves the hero content and upload endpoints of the portfolio site.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::{AppState, create_router};
use folio_core::auth::AdminCredentials;
use folio_core::storage::{StorageConfig, StorageService};
use folio_db::connect;
use folio_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(&config.database).await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .context("jwt.access_token_expiry_secs is out of range")?,
    });

    let admin = match &config.admin.password_hash {
        Some(hash) => {
            info!(username = %config.admin.username, "Admin login enabled");
            Some(Arc::new(AdminCredentials::new(&config.admin.username, hash)))
        }
        None => {
            warn!("FOLIO__ADMIN__PASSWORD_HASH not set; admin login disabled");
            None
        }
    };

    let storage = match StorageConfig::from_settings(&config.storage) {
        Some(storage_config) => {
            let service = StorageService::from_config(storage_config)?;
            info!(
                bucket = %service.bucket(),
                region = %service.config().region,
                "Object storage configured"
            );
            Some(Arc::new(service))
        }
        None => {
            warn!("Storage access key not set; uploads disabled");
            None
        }
    };

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        admin,
        storage,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
