//! Error responses.
//!
//! Every failure is rendered as `{"success": false, "error": <status>, "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::catalog::CatalogError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a catalog error, reporting storage failures through `variant`
    /// instead of a 500.
    pub fn storage_as(error: CatalogError, variant: fn(String) -> ApiError) -> Self {
        match error {
            CatalogError::Persistence(source) => {
                tracing::error!(error = %source, "storage failure");
                variant("the request could not be completed".to_owned())
            }
            other => other.into(),
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::NotFound(m)
            | Self::UnprocessableEntity(m)
            | Self::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound { .. } | CatalogError::EmptyPage { .. } => {
                Self::NotFound(error.to_string())
            }
            CatalogError::EmptyPool { .. } => Self::UnprocessableEntity(error.to_string()),
            CatalogError::InvalidInput(message) => Self::BadRequest(message),
            CatalogError::Persistence(source) => {
                tracing::error!(error = %source, "storage failure");
                Self::Internal("an internal error occurred".to_owned())
            }
        }
    }
}
