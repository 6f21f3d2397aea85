//! Error handling for SafeHaven
//!
//! Centralized error types and handling for the application.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::alert_session::AlertSessionError;
use crate::services::directory_error::DirectoryError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Alert session error: {0}")]
    AlertSession(#[from] AlertSessionError),

    #[error("{0}")]
    Directory(#[from] DirectoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Directory(DirectoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Directory(_) | AppError::AlertSession(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::AlertSession(_) => "AlertSessionError",
            AppError::Directory(DirectoryError::NotFound { .. }) => "NotFound",
            AppError::Directory(DirectoryError::UnknownCategory(_)) => "UnknownCategory",
            AppError::Directory(_) => "ResourceUnavailable",
            AppError::Config(_) => "ConfigurationError",
        }
    }

    /// Check if this error should be logged as an error vs warning
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(error = %message, code = error_code, "Request failed");
        } else {
            tracing::warn!(error = %message, code = error_code, "Request rejected");
        }

        let body = Json(json!({
            "error": error_code,
            "message": message,
            "timestamp": Utc::now().timestamp(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
