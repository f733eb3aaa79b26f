use crate::pipeline::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Everything a handler or middleware can answer with instead of success.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read as a place-order request.
    BadRequest(String),
    RateLimited,
    Pipeline(PipelineError),
}

impl From<PipelineError> for ApiError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests".to_owned(),
            ),
            ApiError::Pipeline(error) => {
                let status = match error {
                    PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
                    PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
                    PipelineError::LookupFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, error.to_string())
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Standard handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
