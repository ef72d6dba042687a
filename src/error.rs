//! Error types for the eUsage review service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::matching::{IllegalAction, SegmentLookupError};

/// Numeric error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchProvider = 2,
    NoSuchTitle = 3,
    BadValue = 4,
    IllegalAction = 5,
    NoRecentReport = 6,
    NoTrReport = 7,
    NoSegment = 8,
    UpstreamFailure = 9,
    UpstreamTimeout = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider {0} not found")]
    ProviderNotFound(String),

    #[error("Report title {0} not found")]
    TitleNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    IllegalAction(#[from] IllegalAction),

    #[error(transparent)]
    SegmentLookup(#[from] SegmentLookupError),

    #[error("eusage-reports returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::ProviderNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchProvider),
            AppError::TitleNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchTitle),
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue)
            }
            AppError::IllegalAction(_) => (StatusCode::CONFLICT, ErrorCode::IllegalAction),
            AppError::SegmentLookup(e) => {
                let code = match e {
                    SegmentLookupError::NoRecentReport => ErrorCode::NoRecentReport,
                    SegmentLookupError::NoTrReport => ErrorCode::NoTrReport,
                    SegmentLookupError::NoSegment => ErrorCode::NoSegment,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code)
            }
            AppError::Upstream { .. } | AppError::Http(_) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::UpstreamFailure)
            }
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, ErrorCode::UpstreamTimeout),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Http(e) => {
                tracing::warn!("Okapi request failed: {:?}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
