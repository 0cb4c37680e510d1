use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use principal_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Unknown email and wrong password share this variant and message
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    AlreadyExists,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for IdentityError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken | StoreError::IdTaken => IdentityError::AlreadyExists,
            StoreError::NotFound => IdentityError::Internal("principal vanished".to_string()),
            StoreError::Backend(e) => IdentityError::Internal(format!("database: {e}")),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl ResponseError for IdentityError {
    fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            IdentityError::AlreadyExists => StatusCode::CONFLICT,
            IdentityError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            IdentityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            IdentityError::InvalidCredentials => ("INVALID_CREDENTIALS", self.to_string()),
            IdentityError::AlreadyExists => ("ALREADY_EXISTS", self.to_string()),
            IdentityError::InvalidArgument(_) => ("INVALID_ARGUMENT", self.to_string()),
            IdentityError::Internal(cause) => {
                tracing::error!(error = %cause, "internal error");
                ("INTERNAL", "internal server error".to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error, message })
    }
}
