//! JSON body extractor with a uniform 400 on any rejection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but a missing content type, a syntax error or a type
/// mismatch all become `AppError::BadRequest` instead of 415/422. Bodies over
/// the configured limit stay 413.
#[derive(Debug)]
pub struct ItemJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ItemJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ItemJson(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => Err(AppError::BadRequest(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}
