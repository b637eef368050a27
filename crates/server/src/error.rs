//! Startup and request error types.
//!
//! [`StartupError`] is fatal: a process that cannot build its backend exits.
//! [`ApiError`] is what a handler returns; it renders as a JSON body
//! `{"error": "<message>"}` with a status chosen by the storage error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use note_api_storage::{ConfigError, StorageError};
use note_api_storage_gcs::GcsStorageError;
use note_api_storage_redis::RedisStorageError;
use thiserror::Error;

/// Errors that prevent the storage backend from being installed.
#[derive(Debug, Clone, Error)]
pub enum StartupError {
    /// The selected backend's settings are missing or invalid.
    #[error("invalid backend configuration: {0}")]
    Config(#[from] ConfigError),

    /// The backend could not be constructed or failed its health check.
    #[error("storage backend unavailable: {0}")]
    Storage(#[from] StorageError),
}

impl From<RedisStorageError> for StartupError {
    fn from(err: RedisStorageError) -> Self {
        match err {
            RedisStorageError::Config(source) => Self::Config(source),
            other => Self::Storage(other.into()),
        }
    }
}

impl From<GcsStorageError> for StartupError {
    fn from(err: GcsStorageError) -> Self {
        match err {
            GcsStorageError::Config(source) => Self::Config(source),
            other => Self::Storage(other.into()),
        }
    }
}

/// Error returned by request handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Returns the HTTP status this error renders with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the message placed in the response body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let status = match &err {
            StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl From<StartupError> for ApiError {
    fn from(err: StartupError) -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(StorageError::not_found("x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(StorageError::unavailable("down")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(StorageError::serialization("bad")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_error_display() {
        let err = ApiError::from(StorageError::not_found("abc"));
        assert_eq!(err.message(), "Note not found: abc");
    }

    #[test]
    fn test_startup_error_is_service_unavailable() {
        let startup = StartupError::from(ConfigError::MissingField { field: "GCS_BUCKET" });
        let err = ApiError::from(startup);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_backend_config_errors_stay_config_errors() {
        let err =
            StartupError::from(RedisStorageError::Config(ConfigError::invalid("REDIS_PORT", "0")));
        assert!(matches!(err, StartupError::Config(_)));

        let err =
            StartupError::from(GcsStorageError::Config(ConfigError::invalid("GCS_PREFIX", "/")));
        assert!(matches!(err, StartupError::Config(_)));
    }
}
