//! Error types for the object-store note backend.
//!
//! This module maps `object_store` errors onto the generic
//! [`StorageError`] kinds.

use note_api_storage::{ConfigError, StorageError};
use thiserror::Error;

/// Result type alias for object-store backend construction.
pub type Result<T> = std::result::Result<T, GcsStorageError>;

/// Errors specific to the object-store backend.
#[derive(Debug, Error)]
pub enum GcsStorageError {
    /// Error reported by the object store client.
    #[error("Object store error: {0}")]
    Store(#[from] object_store::Error),

    /// An object name could not be built or parsed.
    #[error("Object path error: {0}")]
    Path(#[from] object_store::path::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<GcsStorageError> for StorageError {
    fn from(err: GcsStorageError) -> Self {
        match err {
            GcsStorageError::Store(source) => store_error_to_storage_error(source),
            GcsStorageError::Path(source) => {
                StorageError::serialization_with_source("invalid object name", source)
            },
            GcsStorageError::Config(source) => {
                StorageError::unavailable_with_source("object store is misconfigured", source)
            },
        }
    }
}

/// Converts an object store client error to a storage error.
///
/// Only a missing object is `NotFound`. Transport, authentication and
/// every other client failure means the medium cannot serve the request.
fn store_error_to_storage_error(err: object_store::Error) -> StorageError {
    match err {
        object_store::Error::NotFound { path, .. } => StorageError::not_found(path),
        object_store::Error::InvalidPath { source } => {
            StorageError::serialization_with_source("invalid object name", source)
        },
        other => {
            tracing::debug!(error = %other, "object store request failed");
            StorageError::unavailable_with_source("object store request failed", other)
        },
    }
}
