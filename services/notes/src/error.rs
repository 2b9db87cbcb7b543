//! Custom error types for the notes service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::{CacheError, DatabaseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{csrf::CsrfError, forms::SubmissionReply};

/// Error type returned by every loader and action
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// A form posted an `intent` the endpoint does not handle
    #[error("Invalid intent")]
    InvalidIntent,

    /// The honeypot field was filled in
    #[error("Form not submitted properly")]
    Honeypot,

    /// Submitted form failed schema validation
    #[error("Form submission is invalid")]
    Validation(SubmissionReply),

    /// An uploaded file exceeded the upload ceiling
    #[error("File size must be less than 3MB")]
    UploadTooLarge,

    /// The request body exceeded the route's body limit
    #[error("Form submission is too large")]
    BodyTooLarge,

    /// A referenced user, note or image does not exist
    #[error("{0}")]
    NotFound(String),

    /// No signed-in user
    #[error("Unauthorized")]
    Unauthorized,

    /// The signed-in user may not act on the resource
    #[error("{0}")]
    Forbidden(String),

    /// Anti-forgery check failed
    #[error(transparent)]
    Csrf(#[from] CsrfError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Session cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_not_found(username: &str) -> Self {
        AppError::NotFound(format!("No user with the username \"{username}\" exists"))
    }

    pub fn note_not_found(note_id: &str) -> Self {
        AppError::NotFound(format!("No note with the id \"{note_id}\" exists"))
    }

    pub fn image_not_found(image_id: &str) -> Self {
        AppError::NotFound(format!("No image with the id \"{image_id}\" exists"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::InvalidIntent
            | AppError::Honeypot
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge | AppError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::Csrf(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = match self {
            AppError::Validation(reply) => Json(json!(reply)),
            _ if status.is_server_error() => Json(json!({ "error": "Internal server error" })),
            other => Json(json!({ "error": other.to_string() })),
        };

        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

/// Reject a blank route parameter with a 400
pub fn require_param<'a>(value: &'a str, message: &str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(value)
}
