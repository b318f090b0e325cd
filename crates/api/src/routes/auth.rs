//! Administrator login.

use axum::{Json, Router, extract::State, routing::post};
use tracing::{error, info, warn};

use crate::{ApiError, AppState};
use folio_shared::{
    AppError,
    auth::{ADMIN_ROLE, LoginRequest, LoginResponse},
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Exchange admin credentials for an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(admin) = state.admin.as_ref() else {
        return Err(AppError::Unavailable("Admin login is not configured".to_string()).into());
    };

    let authenticated = admin
        .authenticate(&payload.username, &payload.password)
        .map_err(|e| {
            error!(error = %e, "Password verification failed");
            AppError::Internal("An error occurred during login".to_string())
        })?;

    if !authenticated {
        warn!(username = %payload.username, "Rejected login attempt");
        return Err(AppError::Unauthorized("Invalid username or password".to_string()).into());
    }

    let access_token = state
        .jwt_service
        .generate_access_token(admin.username(), ADMIN_ROLE)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            AppError::Internal("An error occurred during login".to_string())
        })?;

    info!(username = %admin.username(), "Admin logged in");
    Ok(Json(LoginResponse::bearer(
        access_token,
        state.jwt_service.access_token_expires_in(),
    )))
}
