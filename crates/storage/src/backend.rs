//! Note backend trait definition.
//!
//! This module defines the [`NoteBackend`] trait, the contract every storage
//! implementation (memory, Redis, object store) satisfies identically.
//!
//! # Design Philosophy
//!
//! The trait is deliberately small:
//! - **Whole-value writes**: `set` replaces the stored note atomically; there are no partial
//!   updates and no deletes
//! - **Async by default**: every call suspends until the medium answers or its client times out
//! - **Three error kinds**: backends map every failure onto [`StorageError`](crate::StorageError)
//!
//! # Implementing a Backend
//!
//! 1. Implement [`NoteBackend`]
//! 2. Map medium-specific errors to [`StorageError`](crate::StorageError) without masking one kind as another
//! 3. Run the [`conformance`](crate::conformance) suite against it
//!
//! See [`MemoryBackend`](crate::MemoryBackend) for a reference implementation.

use async_trait::async_trait;

use crate::{error::StorageResult, types::Note};

/// Abstract storage backend for notes.
///
/// Backends must be `Send + Sync`: request handlers call them concurrently.
///
/// # Key Operations
///
/// | Method | Description |
/// |--------|-------------|
/// | [`get`](NoteBackend::get) | Retrieve a note by id |
/// | [`set`](NoteBackend::set) | Store or overwrite a note |
/// | [`keys`](NoteBackend::keys) | Snapshot of every stored id |
/// | [`list`](NoteBackend::list) | Every stored note, in `keys` order |
/// | [`health_check`](NoteBackend::health_check) | Verify the medium is reachable |
///
/// # Example
///
/// ```
/// use note_api_storage::{MemoryBackend, Note, NoteBackend};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let backend = MemoryBackend::new();
///
/// backend.set("abc-123", &Note::new("hello")).await.unwrap();
/// assert_eq!(backend.get("abc-123").await.unwrap(), Note::new("hello"));
/// assert_eq!(backend.keys().await.unwrap(), vec!["abc-123".to_string()]);
/// # });
/// ```
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// Retrieves the note stored under `id`.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`](crate::StorageError::NotFound) if nothing is stored under `id`
    /// - [`StorageError::Unavailable`](crate::StorageError::Unavailable) if the medium cannot be reached
    /// - [`StorageError::Serialization`](crate::StorageError::Serialization) if the stored value does not decode
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn get(&self, id: &str) -> StorageResult<Note>;

    /// Stores `note` under `id`, replacing any previous value.
    ///
    /// Calling `set` twice with the same arguments leaves the store in the
    /// same observable state. A failed `set` leaves the previous value intact.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Unavailable`](crate::StorageError::Unavailable) if the medium cannot be reached
    /// - [`StorageError::Serialization`](crate::StorageError::Serialization) if the note cannot be encoded
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn set(&self, id: &str, note: &Note) -> StorageResult<()>;

    /// Returns the ids of every stored note.
    ///
    /// No ordering is promised across backends.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`](crate::StorageError::Unavailable) if the medium cannot be reached.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn keys(&self) -> StorageResult<Vec<String>>;

    /// Checks that the backend can serve requests.
    ///
    /// Should be lightweight: the backend selector runs it once at
    /// construction so that an unreachable medium fails startup instead of
    /// the first request.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`](crate::StorageError::Unavailable) if the medium cannot be reached.
    #[must_use = "health check results indicate backend availability and must be inspected"]
    async fn health_check(&self) -> StorageResult<()>;

    /// Returns every stored note, in the order produced by [`keys`](NoteBackend::keys).
    ///
    /// # Errors
    ///
    /// Propagates the first error from `keys` or `get`. A key that vanishes
    /// between the two calls surfaces as [`StorageError::NotFound`](crate::StorageError::NotFound).
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn list(&self) -> StorageResult<Vec<Note>> {
        let keys = self.keys().await?;
        let mut notes = Vec::with_capacity(keys.len());
        for key in &keys {
            notes.push(self.get(key).await?);
        }
        Ok(notes)
    }
}

