//! Error types for the Redis note backend.
//!
//! This module maps `redis` client errors onto the generic
//! [`StorageError`] kinds.

use note_api_storage::{ConfigError, StorageError};
use redis::{ErrorKind, RedisError};
use thiserror::Error;

/// Result type alias for Redis backend construction.
pub type Result<T> = std::result::Result<T, RedisStorageError>;

/// Errors specific to the Redis backend.
#[derive(Debug, Error)]
pub enum RedisStorageError {
    /// Error reported by the `redis` client or server.
    #[error("Redis error: {0}")]
    Client(#[from] RedisError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<RedisStorageError> for StorageError {
    fn from(err: RedisStorageError) -> Self {
        match err {
            RedisStorageError::Client(source) => redis_error_to_storage_error(source),
            RedisStorageError::Config(source) => {
                StorageError::unavailable_with_source("Redis backend is misconfigured", source)
            },
        }
    }
}

/// Converts a client error to a storage error.
///
/// Only a reply the client could not convert, or a key holding a non-string
/// value, means the data itself is bad. Every other failure is the medium's.
fn redis_error_to_storage_error(err: RedisError) -> StorageError {
    if err.kind() == ErrorKind::TypeError || err.code() == Some("WRONGTYPE") {
        return StorageError::serialization_with_source("unexpected Redis reply type", err);
    }

    let message = if err.is_connection_refusal() {
        "Redis refused the connection"
    } else if err.is_timeout() {
        "Redis operation timed out"
    } else if err.is_connection_dropped() {
        "Redis connection dropped"
    } else if err.is_io_error() {
        "Redis I/O error"
    } else {
        tracing::debug!(kind = ?err.kind(), "Redis command failed");
        "Redis command failed"
    };

    StorageError::unavailable_with_source(message, err)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;

    fn map(err: RedisError) -> StorageError {
        RedisStorageError::Client(err).into()
    }

    #[test]
    fn test_connection_refused_mapping() {
        let err = RedisError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        let storage_err = map(err);

        assert!(matches!(storage_err, StorageError::Unavailable { ref message, .. }
            if message == "Redis refused the connection"));
    }

    #[test]
    fn test_timeout_mapping() {
        let err = RedisError::from(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        assert!(map(err).is_unavailable());
    }

    #[test]
    fn test_connection_dropped_mapping() {
        let err = RedisError::from(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        assert!(map(err).is_unavailable());
    }

    #[test]
    fn test_response_error_mapping() {
        let err = RedisError::from((ErrorKind::ResponseError, "ERR unknown command"));
        assert!(map(err).is_unavailable());
    }

    #[test]
    fn test_auth_failure_mapping() {
        let err = RedisError::from((ErrorKind::AuthenticationFailed, "invalid password"));
        assert!(map(err).is_unavailable());
    }

    #[test]
    fn test_type_error_mapping() {
        let err = RedisError::from((ErrorKind::TypeError, "response was of incompatible type"));
        assert!(map(err).is_serialization());
    }

    #[test]
    fn test_config_error_mapping() {
        let err = RedisStorageError::from(ConfigError::invalid("REDIS_PORT", "zero"));
        let storage_err: StorageError = err.into();

        assert!(storage_err.is_unavailable());
    }

    #[test]
    fn test_source_chain_preserved() {
        use std::error::Error as _;

        let err = RedisError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        let storage_err = map(err);

        assert!(storage_err.source().is_some());
    }

    #[test]
    fn test_error_display() {
        let err = RedisStorageError::Config(ConfigError::MissingField { field: "REDIS_HOST" });
        assert_eq!(err.to_string(), "Configuration error: missing required setting: REDIS_HOST");
    }
}
