//! API error types.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use vgen_provider::ProviderError;
use vgen_storage::StorageError;
use vgen_store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Request could not be extracted; keeps axum's status code
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Storage(StorageError::InvalidKey(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Rejected { status, .. } => *status,
            ApiError::Store(StoreError::DuplicateId(_))
            | ApiError::Storage(StorageError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),+) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    Self::Rejected {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    }
                }
            }
        )+
    };
}

impl_from_rejection!(JsonRejection, QueryRejection, MultipartRejection);

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = if status.is_server_error() {
            error!("Request failed: {}", self);
            if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                "An internal error occurred".to_string()
            } else {
                self.to_string()
            }
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
