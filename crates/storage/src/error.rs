//! Storage error types and result alias.
//!
//! Every [`NoteBackend`](crate::NoteBackend) maps its medium-specific failures
//! onto the three kinds defined here, and never reports one kind as another.
//!
//! # Error Types
//!
//! - [`StorageError::NotFound`] - No note is stored under the requested id
//! - [`StorageError::Unavailable`] - The medium could not be reached or errored
//! - [`StorageError::Serialization`] - A stored value does not decode into a note, or a note
//!   could not be encoded
//!
//! # Example
//!
//! ```
//! use note_api_storage::{StorageError, StorageResult};
//!
//! fn lookup(id: &str) -> StorageResult<String> {
//!     Err(StorageError::not_found(id))
//! }
//!
//! assert!(lookup("abc").unwrap_err().is_not_found());
//! ```

use std::sync::Arc;

use thiserror::Error;

/// A boxed error type for source chain tracking.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during note storage operations.
///
/// Errors preserve their source chain via the `#[source]` attribute, so a
/// logged `Unavailable` still shows the underlying client error.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No value is stored under the requested note id.
    #[error("Note not found: {key}")]
    NotFound {
        /// The id that was looked up.
        key: String,
    },

    /// The backing medium could not be reached or returned an error.
    ///
    /// Covers network failures, refused connections, timeouts reported by the
    /// client, and authentication failures against the medium.
    #[error("Backend unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
        /// The client error that caused it, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// A note could not be encoded, or a stored value could not be decoded.
    ///
    /// A present-but-malformed value is reported here and never as
    /// [`NotFound`](StorageError::NotFound).
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the encoding failure.
        message: String,
        /// The underlying codec error, if any.
        #[source]
        source: Option<BoxError>,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error for the given note id.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a new `Unavailable` error with the given message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into(), source: None }
    }

    /// Creates a new `Unavailable` error with a message and source error.
    #[must_use]
    pub fn unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Creates a new `Serialization` error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into(), source: None }
    }

    /// Creates a new `Serialization` error with a message and source error.
    #[must_use]
    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Returns `true` for [`StorageError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StorageError::Unavailable`].
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns `true` for [`StorageError::Serialization`].
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

/// Errors produced while validating or loading backend configuration.
///
/// These are construction-time failures: a process that cannot build its
/// backend must not start serving requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("missing required setting: {field}")]
    MissingField {
        /// Name of the missing setting.
        field: &'static str,
    },

    /// A setting was provided but could not be used.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Creates a new `InvalidValue` error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue { field, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(StorageError::not_found("abc").to_string(), "Note not found: abc");
        assert_eq!(
            StorageError::unavailable("connection refused").to_string(),
            "Backend unavailable: connection refused"
        );
        assert_eq!(
            StorageError::serialization("bad json").to_string(),
            "Serialization error: bad json"
        );
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StorageError::unavailable_with_source("redis GET failed", io);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("refused"));
    }

    #[test]
    fn test_kind_predicates_are_exclusive() {
        let errors = [
            StorageError::not_found("k"),
            StorageError::unavailable("down"),
            StorageError::serialization("bad"),
        ];
        for err in &errors {
            let hits =
                [err.is_not_found(), err.is_unavailable(), err.is_serialization()]
                    .iter()
                    .filter(|hit| **hit)
                    .count();
            assert_eq!(hits, 1, "{err:?} should match exactly one kind");
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingField { field: "GCS_BUCKET" };
        assert_eq!(err.to_string(), "missing required setting: GCS_BUCKET");

        let err = ConfigError::invalid("REDIS_PORT", "must be non-zero");
        assert_eq!(err.to_string(), "invalid value for REDIS_PORT: must be non-zero");
    }
}
