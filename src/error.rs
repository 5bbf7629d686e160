//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use crate::service::FieldViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
    #[error("unsupported database url scheme: {0}")]
    UnsupportedDatabase(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body too large")]
    PayloadTooLarge,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(ref what) => {
                tracing::debug!(%what, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Validation(ref violations) => {
                let message = self.to_string();
                let details = serde_json::to_value(violations).ok();
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new("validation_error", message, details)),
                )
                    .into_response()
            }
            AppError::BadRequest(_) => {
                let message = self.to_string();
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new("bad_request", message, None)),
                )
                    .into_response()
            }
            AppError::PayloadTooLarge => {
                let message = self.to_string();
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(ErrorBody::new("payload_too_large", message, None)),
                )
                    .into_response()
            }
            AppError::Db(ref e) => {
                tracing::error!(error = %e, "storage failure");
                internal_error()
            }
            AppError::Config(ref e) => {
                tracing::error!(error = %e, "configuration failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(
            "internal_error",
            "internal server error".to_string(),
            None,
        )),
    )
        .into_response()
}
