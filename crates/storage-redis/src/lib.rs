//! Redis-backed implementation of [`NoteBackend`](note_api_storage::NoteBackend).
//!
//! This crate provides [`RedisBackend`], which stores each note as a JSON
//! document in a Redis string key.
//!
//! # Key Mapping
//!
//! | NoteBackend | Redis |
//! | ----------- | ----- |
//! | `get(id)`        | `GET prefix+id`, JSON-decoded |
//! | `set(id, note)`  | `SET prefix+id <json>` |
//! | `keys()`         | `KEYS <escaped prefix>*`, prefix stripped |
//! | `health_check()` | `PING` |
//!
//! `KEYS` walks the whole keyspace in one blocking call on the server. That
//! is acceptable for a dedicated note database; share the server with other
//! data only behind a distinct `key_prefix`.
//!
//! # Quick Start
//!
//! ```no_run
//! // Requires a running Redis server.
//! use note_api_storage::NoteBackend;
//! use note_api_storage_redis::{RedisBackend, RedisBackendConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisBackendConfig::from_env()?;
//!     let backend = RedisBackend::connect(&config).await?;
//!     backend.health_check().await?;
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
/// Byte-level Redis command seam.
pub mod connection;
mod config;
mod error;
mod keys;

/// Shared test utilities for Redis backend testing.
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;

/// Redis-backed note backend.
pub use backend::RedisBackend;
/// Configuration type, defaults and environment variable names.
pub use config::{
    RedisBackendConfig, DEFAULT_DB, DEFAULT_HOST, DEFAULT_PORT, ENV_DB, ENV_HOST,
    ENV_KEY_PREFIX, ENV_PASSWORD, ENV_PORT,
};
/// Capability trait the backend issues commands through.
pub use connection::RedisConnection;
/// Redis-specific error type and result alias.
pub use error::{RedisStorageError, Result};
/// Configuration validation error type.
pub use note_api_storage::ConfigError;
