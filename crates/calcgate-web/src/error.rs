use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use calcgate_core::{retry_after_secs, CoreError};

use crate::dto::ErrorBody;

#[derive(Debug)]
pub enum AppError {
    InvalidArgument(String),
    RateLimitExceeded { retry_after: Duration },
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // 402 is part of the public contract for this endpoint.
            AppError::RateLimitExceeded { .. } => (
                StatusCode::PAYMENT_REQUIRED,
                "Request limit exceeded. Please try again later.".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let mut response = (status, axum::Json(ErrorBody { error: message })).into_response();

        if let AppError::RateLimitExceeded { retry_after } = self {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs(&retry_after)),
            );
        }
        response
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            CoreError::RateLimitExceeded { retry_after } => {
                AppError::RateLimitExceeded { retry_after }
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidArgument(format!(
            "Invalid request parameters: {}",
            rejection.body_text()
        ))
    }
}
