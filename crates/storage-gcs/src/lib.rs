//! Object-store implementation of [`NoteBackend`](note_api_storage::NoteBackend)
//! for Google Cloud Storage.
//!
//! This crate provides [`ObjectStoreBackend`], which keeps each note as one
//! JSON object named `{prefix}/{percent-encoded id}`.
//!
//! # Key Mapping
//!
//! | NoteBackend | Object store |
//! | ----------- | ------------ |
//! | `get(id)`        | `GET {prefix}/{id}`, JSON-decoded |
//! | `set(id, note)`  | whole-object `PUT {prefix}/{id}` |
//! | `keys()`         | recursive `LIST {prefix}/`, foreign objects skipped |
//! | `health_check()` | delimited `LIST {prefix}/` |
//!
//! # Quick Start
//!
//! ```no_run
//! // Requires a bucket and credentials.
//! use note_api_storage::NoteBackend;
//! use note_api_storage_gcs::{GcsBackendConfig, ObjectStoreBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GcsBackendConfig::from_env()?;
//!     let backend = ObjectStoreBackend::connect(&config)?;
//!     backend.health_check().await?;
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod keys;

/// Shared test utilities for object-store backend testing.
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;

/// Object-store backed note backend.
pub use backend::ObjectStoreBackend;
/// Configuration type, defaults and environment variable names.
pub use config::{GcsBackendConfig, DEFAULT_PREFIX, ENV_BUCKET, ENV_CREDENTIALS, ENV_PREFIX};
/// Object-store specific error type and result alias.
pub use error::{GcsStorageError, Result};
/// Configuration validation error type.
pub use note_api_storage::ConfigError;
