//! Conversion of domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::hero::HeroError;
use folio_core::storage::StorageError;
use folio_shared::AppError;
use serde_json::json;
use tracing::error;

/// Message returned for an unknown hero id.
pub const HERO_NOT_FOUND: &str = "Hero content not found";

/// Handler error: an [`AppError`] rendered as `{"error", "message"}` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<HeroError> for ApiError {
    fn from(err: HeroError) -> Self {
        match err {
            HeroError::NotFound(_) => Self(AppError::NotFound(HERO_NOT_FOUND.to_string())),
            HeroError::Conflict(msg) => Self(AppError::Conflict(msg)),
            HeroError::Repository(msg) => {
                error!(error = %msg, "Hero repository error");
                Self(AppError::Database("An error occurred".to_string()))
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Upload { .. } => Self(AppError::ExternalService(err.to_string())),
            StorageError::FileTooLarge { .. } => Self(AppError::PayloadTooLarge(err.to_string())),
            StorageError::Configuration(msg) => {
                error!(error = %msg, "Storage misconfigured");
                Self(AppError::Internal("An error occurred".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_not_found_maps_to_404() {
        let ApiError(err) = HeroError::NotFound(5).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Hero content not found");
    }

    #[test]
    fn test_hero_conflict_maps_to_409() {
        let ApiError(err) = HeroError::conflict("busy").into();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_repository_error_is_not_leaked() {
        let ApiError(err) = HeroError::repository("connection reset by peer").into();
        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("connection reset"));
    }

    #[test]
    fn test_upload_error_keeps_provider_details() {
        let ApiError(err) = StorageError::Upload {
            code: "PermissionDenied".to_string(),
            message: "Access Denied".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), 502);
        assert!(err.message().contains("PermissionDenied - Access Denied"));
    }

    #[test]
    fn test_file_too_large_maps_to_413() {
        let ApiError(err) = StorageError::file_too_large(11, 10).into();
        assert_eq!(err.status_code(), 413);
    }
}
