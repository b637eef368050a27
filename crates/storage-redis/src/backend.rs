//! Redis-backed note backend implementation.
//!
//! This module provides [`RedisBackend`], which implements
//! [`NoteBackend`] over a Redis keyspace. Notes are stored as their JSON
//! document under `key_prefix + id`.
//!
//! # Lifetime of a Note
//!
//! A note lives until Redis evicts it. Under a `maxmemory` eviction policy
//! other than `noeviction`, a note can disappear without a delete and a later
//! `get` reports it as missing.

use std::sync::Arc;

use async_trait::async_trait;
use note_api_storage::{decode_note, encode_note, Note, NoteBackend, StorageError, StorageResult};
use redis::aio::ConnectionManager;
use tracing::{instrument, warn};

use crate::{
    config::RedisBackendConfig,
    connection::RedisConnection,
    error::{RedisStorageError, Result},
    keys::{keys_pattern, note_id, redis_key},
};

/// Redis-backed implementation of [`NoteBackend`].
///
/// # Error Mapping
///
/// | Situation | Error |
/// |-----------|-------|
/// | Nil reply to `GET` | [`StorageError::NotFound`] |
/// | Connection, I/O, timeout or command failure | [`StorageError::Unavailable`] |
/// | Value is not a decodable note, or not a string | [`StorageError::Serialization`] |
///
/// # Thread Safety
///
/// `RedisBackend` is `Send + Sync` and cheap to clone. The production
/// connection is a multiplexed [`ConnectionManager`] that reconnects on its
/// own, so no lock is held across requests.
///
/// # Example
///
/// ```no_run
/// // Requires a running Redis server.
/// use note_api_storage::{Note, NoteBackend};
/// use note_api_storage_redis::{RedisBackend, RedisBackendConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RedisBackendConfig::builder().key_prefix("notes:").build()?;
///     let backend = RedisBackend::connect(&config).await?;
///
///     backend.set("abc", &Note::new("hello")).await?;
///     assert_eq!(backend.get("abc").await?.text, "hello");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RedisBackend {
    connection: Arc<dyn RedisConnection>,
    key_prefix: String,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend").field("key_prefix", &self.key_prefix).finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connects to the server described by `config`.
    ///
    /// The first connection is established eagerly; later drops are healed by
    /// the connection manager.
    ///
    /// # Errors
    ///
    /// Returns [`RedisStorageError::Client`] if the URL is rejected or the
    /// server cannot be reached.
    pub async fn connect(config: &RedisBackendConfig) -> Result<Self> {
        let client = redis::Client::open(config.url()).map_err(RedisStorageError::from)?;
        let manager = ConnectionManager::new(client).await.map_err(RedisStorageError::from)?;

        tracing::info!(
            host = %config.host(),
            port = config.port(),
            db = config.db(),
            key_prefix = %config.key_prefix(),
            "connected to Redis"
        );

        Ok(Self::from_connection(Arc::new(manager), config.key_prefix()))
    }

    /// Creates a backend over an existing connection.
    #[must_use]
    pub fn from_connection(
        connection: Arc<dyn RedisConnection>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self { connection, key_prefix: key_prefix.into() }
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }
}

#[async_trait]
impl NoteBackend for RedisBackend {
    #[instrument(skip(self), fields(backend = "redis"))]
    async fn get(&self, id: &str) -> StorageResult<Note> {
        let key = redis_key(&self.key_prefix, id);
        let bytes = self
            .connection
            .get(&key)
            .await
            .map_err(RedisStorageError::from)?
            .ok_or_else(|| StorageError::not_found(id))?;

        decode_note(id, &bytes)
    }

    #[instrument(skip(self, note), fields(backend = "redis"))]
    async fn set(&self, id: &str, note: &Note) -> StorageResult<()> {
        // Encode before touching Redis so a bad note never clobbers the old value.
        let value = encode_note(note)?;
        let key = redis_key(&self.key_prefix, id);
        self.connection.set(&key, value).await.map_err(RedisStorageError::from)?;
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn keys(&self) -> StorageResult<Vec<String>> {
        let raw_keys = self
            .connection
            .keys(&keys_pattern(&self.key_prefix))
            .await
            .map_err(RedisStorageError::from)?;

        let mut ids = Vec::with_capacity(raw_keys.len());
        for raw in raw_keys {
            let Ok(key) = String::from_utf8(raw) else {
                warn!("skipping Redis key that is not valid UTF-8");
                continue;
            };
            match note_id(&self.key_prefix, &key) {
                Some(id) => ids.push(id.to_owned()),
                None => warn!(key = %key, "skipping Redis key outside the note prefix"),
            }
        }
        Ok(ids)
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn health_check(&self) -> StorageResult<()> {
        self.connection.ping().await.map_err(RedisStorageError::from)?;
        Ok(())
    }
}
