use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use principal_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("user not found")]
    NotFound,

    #[error("email already in use")]
    AlreadyExists,

    #[error("{0}")]
    PermissionDenied(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::EmailTaken | StoreError::IdTaken => AppError::AlreadyExists,
            StoreError::Backend(e) => AppError::Internal(format!("database: {e}")),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyExists => "ALREADY_EXISTS",
            AppError::PermissionDenied(_) => "PERMISSION_DENIED",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(cause) => {
                tracing::error!(error = %cause, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code(),
            message,
        })
    }
}
