use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use travelwise_core::StoreError;
use travelwise_offer::PromoError;

/// API-level failures. Every variant maps to a distinct status with a
/// `{"message": ...}` body; store failures are logged and surface as a
/// generic 500.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(err) => {
                tracing::error!("internal server error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<PromoError> for AppError {
    fn from(err: PromoError) -> Self {
        match err {
            PromoError::NotFound => AppError::NotFound(err.to_string()),
            PromoError::LimitExceeded
            | PromoError::TypeMismatch
            | PromoError::BelowMinimum { .. }
            | PromoError::UnsupportedDiscount => AppError::BadRequest(err.to_string()),
            PromoError::Store(store) => AppError::Internal(store.into()),
        }
    }
}
