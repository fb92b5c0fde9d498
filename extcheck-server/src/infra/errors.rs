use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use extcheck_contracts::ApiErrorResponse;
use extcheck_core::ExtensionError;
use std::fmt;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str =
    "A server error occurred. Please try again later.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE,
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorResponse::new(self.code, self.message));
        (self.status, body).into_response()
    }
}

impl From<ExtensionError> for AppError {
    fn from(err: ExtensionError) -> Self {
        let status = match &err {
            ExtensionError::Invalid(_) => StatusCode::BAD_REQUEST,
            ExtensionError::AlreadyExists
            | ExtensionError::FixedExtensionConflict => StatusCode::CONFLICT,
            ExtensionError::NotFound => StatusCode::NOT_FOUND,
            ExtensionError::MaxLimitExceeded { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ExtensionError::Storage(source) => {
                error!(error = %source, "extension storage operation failed");
                return Self::internal();
            }
        };

        warn!(code = err.code(), message = %err, "extension request rejected");
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "malformed request body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection.body_text(), "malformed query string");
        Self::bad_request(rejection.body_text())
    }
}
