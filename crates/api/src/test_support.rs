//! Shared helpers for route tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{FixedOffset, TimeZone};
use http_body_util::BodyExt;
use opendal::{Operator, services};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};
use folio_core::auth::{AdminCredentials, hash_password};
use folio_core::storage::{StorageConfig, StorageService};
use folio_db::entities::hero_contents;
use folio_shared::{JwtConfig, JwtService, auth::ADMIN_ROLE};

pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn memory_storage() -> StorageService {
    memory_storage_with_max(StorageConfig::DEFAULT_MAX_FILE_SIZE)
}

pub fn memory_storage_with_max(max_file_size: u64) -> StorageService {
    let operator = Operator::new(services::Memory::default())
        .expect("memory operator")
        .finish();
    let config = StorageConfig::new("key", "secret")
        .with_bucket("folio-assets")
        .with_region("ap-northeast-2")
        .with_prefix("site/")
        .with_max_file_size(max_file_size);
    StorageService::with_operator(operator, config)
}

pub fn state(db: DatabaseConnection, storage: Option<StorageService>) -> AppState {
    let hash = hash_password(ADMIN_PASSWORD).expect("hash");
    AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        admin: Some(Arc::new(AdminCredentials::new("admin", hash))),
        storage: storage.map(Arc::new),
    }
}

pub fn app(state: AppState) -> Router {
    create_router(state)
}

pub fn token(state: &AppState, role: &str) -> String {
    state
        .jwt_service
        .generate_access_token("admin", role)
        .expect("token")
}

pub fn admin_token(state: &AppState) -> String {
    token(state, ADMIN_ROLE)
}

pub fn hero_row(id: i32, is_active: bool) -> hero_contents::Model {
    let at = FixedOffset::east_opt(0)
        .and_then(|tz| tz.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single())
        .expect("timestamp");
    hero_contents::Model {
        id,
        title: format!("hero-{id}"),
        title_highlight: "Nanophotonics".to_string(),
        description: "Row from the mock database".to_string(),
        cta_primary_text: "Explore Research".to_string(),
        cta_primary_link: "/research".to_string(),
        cta_secondary_text: "View CV".to_string(),
        cta_secondary_link: "/cv".to_string(),
        is_active,
        created_at: at,
        updated_at: at,
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("response")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
