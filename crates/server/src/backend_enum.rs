//! Unified backend enum for note-api.
//!
//! This module provides the [`Backend`] enum, a closed set of every storage
//! backend the service can run on. The selector picks a variant at runtime;
//! calls then go through static dispatch.
//!
//! # Available Backends
//!
//! | Variant | Medium |
//! |---------|--------|
//! | [`Backend::Memory`] | Process memory |
//! | [`Backend::Redis`] | Redis server |
//! | [`Backend::Gcs`] | Google Cloud Storage bucket |
//!
//! # Usage
//!
//! ```
//! use note_api::Backend;
//! use note_api_storage::{Note, NoteBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Backend::memory();
//!
//! backend.set("abc", &Note::new("hello")).await?;
//! let note = backend.get("abc").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use note_api_storage::{MemoryBackend, Note, NoteBackend, StorageResult};
use note_api_storage_gcs::ObjectStoreBackend;
use note_api_storage_redis::RedisBackend;

use crate::config::BackendKind;

/// Unified note backend enum.
#[derive(Clone)]
pub enum Backend {
    /// In-memory backend.
    Memory(MemoryBackend),
    /// Redis-backed backend.
    Redis(RedisBackend),
    /// Object-store backed backend.
    Gcs(ObjectStoreBackend),
}

impl Backend {
    /// Create a new, empty memory backend.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryBackend::new())
    }

    /// Returns which kind of backend this is.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Memory(_) => BackendKind::Memory,
            Self::Redis(_) => BackendKind::Redis,
            Self::Gcs(_) => BackendKind::Gcs,
        }
    }
}

#[async_trait]
impl NoteBackend for Backend {
    async fn get(&self, id: &str) -> StorageResult<Note> {
        match self {
            Self::Memory(b) => b.get(id).await,
            Self::Redis(b) => b.get(id).await,
            Self::Gcs(b) => b.get(id).await,
        }
    }

    async fn set(&self, id: &str, note: &Note) -> StorageResult<()> {
        match self {
            Self::Memory(b) => b.set(id, note).await,
            Self::Redis(b) => b.set(id, note).await,
            Self::Gcs(b) => b.set(id, note).await,
        }
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        match self {
            Self::Memory(b) => b.keys().await,
            Self::Redis(b) => b.keys().await,
            Self::Gcs(b) => b.keys().await,
        }
    }

    async fn health_check(&self) -> StorageResult<()> {
        match self {
            Self::Memory(b) => b.health_check().await,
            Self::Redis(b) => b.health_check().await,
            Self::Gcs(b) => b.health_check().await,
        }
    }

    async fn list(&self) -> StorageResult<Vec<Note>> {
        match self {
            Self::Memory(b) => b.list().await,
            Self::Redis(b) => b.list().await,
            Self::Gcs(b) => b.list().await,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory(_) => write!(f, "Backend::Memory"),
            Self::Redis(b) => f.debug_tuple("Backend::Redis").field(b).finish(),
            Self::Gcs(b) => f.debug_tuple("Backend::Gcs").field(b).finish(),
        }
    }
}
