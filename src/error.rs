use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error vocabulary shared by the identity and survey handlers. Every variant
/// ends one request; none of them takes the process down.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API key")]
    Unauthorized,
    #[error("Survey not found")]
    NotFound,
    #[error("Invalid answer")]
    InvalidAnswer,
    #[error("No responses yet")]
    NoResponses,
    #[error("Username already taken")]
    DuplicateUsername,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Survey not found"),
            ApiError::InvalidAnswer => (StatusCode::BAD_REQUEST, "Invalid answer"),
            ApiError::NoResponses => (StatusCode::NOT_FOUND, "No responses yet"),
            ApiError::DuplicateUsername => (StatusCode::CONFLICT, "Username already taken"),
            ApiError::DuplicateEmail => (StatusCode::CONFLICT, "Email already registered"),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str()),
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::Database(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(error: bcrypt::BcryptError) -> Self {
        ApiError::Internal(error.to_string())
    }
}
