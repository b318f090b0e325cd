//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::auth::{auth_middleware, require_admin},
};

pub mod auth;
pub mod health;
pub mod hero;
pub mod uploads;

/// Creates the API router. Admin routes sit behind token validation and the
/// admin gate; everything else is public.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Layers run outside-in: token validation first, then the role check.
    let upload_limit = uploads::body_limit(state.storage.as_deref());
    let admin_routes = Router::new()
        .merge(hero::admin_routes())
        .merge(uploads::routes(upload_limit))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(hero::public_routes())
        .merge(admin_routes)
}
