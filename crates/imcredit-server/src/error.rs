//! JSON error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use imcredit_core::CreditError;

/// Shown in place of storage failures
pub const GENERIC_FAILURE: &str = "Failed, please try again";

/// Every handler error, rendered as `{"error": message}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Credit(#[from] CreditError),

    /// Request body that is not valid JSON for the endpoint
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Credit(CreditError::Validation(_)) | ApiError::Credit(CreditError::Boundary) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Credit(CreditError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Credit(CreditError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            GENERIC_FAILURE.to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
