//! Hero content routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::error;

use crate::{ApiError, AppState};
use folio_core::hero::{HeroContent, HeroContentInput, HeroContentPatch, HeroService};
use folio_db::HeroContentRepository;

/// Routes readable by anyone.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/hero", get(get_active))
}

/// Routes that require an admin token.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/hero", post(create_hero))
        .route("/hero/all", get(list_heroes))
        .route("/hero/{id}", put(update_hero).delete(delete_hero))
        .route("/hero/{id}/activate", post(activate_hero))
}

fn hero_service(state: &AppState) -> HeroService<HeroContentRepository> {
    HeroService::new(Arc::new(HeroContentRepository::new(state.db.clone())))
}

/// GET /hero - The active hero content. Never fails: on a storage error the
/// placeholder content is served.
async fn get_active(State(state): State<AppState>) -> Json<HeroContent> {
    match hero_service(&state).get_active().await {
        Ok(hero) => Json(hero),
        Err(e) => {
            error!(error = %e, "Failed to load active hero content");
            Json(HeroContent::fallback())
        }
    }
}

/// GET /hero/all - Every record, newest first.
async fn list_heroes(State(state): State<AppState>) -> Result<Json<Vec<HeroContent>>, ApiError> {
    Ok(Json(hero_service(&state).list_all().await?))
}

/// POST /hero - Create a record.
async fn create_hero(
    State(state): State<AppState>,
    Json(input): Json<HeroContentInput>,
) -> Result<Json<HeroContent>, ApiError> {
    Ok(Json(hero_service(&state).create(input).await?))
}

/// PUT /hero/{id} - Partial update.
async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<HeroContentPatch>,
) -> Result<Json<HeroContent>, ApiError> {
    Ok(Json(hero_service(&state).update(id, patch).await?))
}

/// DELETE /hero/{id}
async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    hero_service(&state).delete(id).await?;
    Ok(Json(json!({ "message": "Hero content deleted successfully" })))
}

/// POST /hero/{id}/activate - Make this record the only active one.
async fn activate_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let hero = hero_service(&state).activate(id).await?;
    Ok(Json(json!({
        "message": "Hero content activated successfully",
        "hero": hero,
    })))
}
