use crate::models::catalog::BackendError;
use crate::models::responses::ErrorResponse;
use crate::services::proxy::ProxyError;
use crate::services::resolver::ResolutionError;
use crate::utils::validation::ValidationError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error resolving download links: {0}")]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error("Error searching catalog: {0}")]
    Backend(#[from] BackendError),
    // extractor failures keep the status axum picked for them
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Proxy(ProxyError::InvalidDownloadUrl) => StatusCode::BAD_REQUEST,
            ApiError::Proxy(ProxyError::UpstreamHttp { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Proxy(ProxyError::UpstreamUnreachable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
