//! Response helpers: error envelope and `201 Created` with `Location`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: &str, message: String, details: Option<serde_json::Value>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        }
    }
}

/// 201 with the created resource as JSON and a `Location` header.
/// The header is omitted if `location` is not a valid header value.
pub fn created_at<T: Serialize>(location: &str, data: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
