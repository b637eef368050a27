//! In-memory note backend implementation.
//!
//! This module provides [`MemoryBackend`], the reference implementation of
//! [`NoteBackend`] over a process-local map.
//!
//! # Features
//!
//! - **Thread-safe**: Uses [`parking_lot::RwLock`] around the map; writers are serialized and
//!   `keys` never observes a map mid-update
//! - **Ordered storage**: Notes live in a [`BTreeMap`], so `keys` is lexicographic
//! - **No encoding**: The stored representation is the [`Note`] value itself
//!
//! # Example
//!
//! ```
//! use note_api_storage::{MemoryBackend, Note, NoteBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set("greeting", &Note::new("hello")).await.unwrap();
//!     let note = backend.get("greeting").await.unwrap();
//!
//!     assert_eq!(note.text, "hello");
//! }
//! ```
//!
//! # Limitations
//!
//! - Data is not persisted; all notes are lost when the process exits. This
//!   differs from the object-store backend, which keeps notes indefinitely.
//! - No replication: two processes never see each other's notes

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use crate::{
    backend::NoteBackend,
    error::{StorageError, StorageResult},
    types::Note,
};

/// In-memory note backend using [`BTreeMap`].
///
/// The only failure this backend reports is
/// [`StorageError::NotFound`]; it is never unavailable.
///
/// # Cloning
///
/// `MemoryBackend` is cheaply cloneable via [`Arc`]. All clones share the
/// same underlying map.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    notes: Arc<RwLock<BTreeMap<String, Note>>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    /// Returns `true` if no notes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend").field("notes", &self.len()).finish()
    }
}

#[async_trait]
impl NoteBackend for MemoryBackend {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StorageResult<Note> {
        let notes = self.notes.read();
        notes.get(id).cloned().ok_or_else(|| StorageError::not_found(id))
    }

    #[instrument(skip(self, note))]
    async fn set(&self, id: &str, note: &Note) -> StorageResult<()> {
        let mut notes = self.notes.write();
        notes.insert(id.to_owned(), note.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn keys(&self) -> StorageResult<Vec<String>> {
        let notes = self.notes.read();
        Ok(notes.keys().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> StorageResult<()> {
        // Acquiring the read lock proves nothing is deadlocked
        let _unused = self.notes.read();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StorageResult<Vec<Note>> {
        // One lock for the whole snapshot instead of keys-then-get
        let notes = self.notes.read();
        Ok(notes.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let backend = MemoryBackend::new();

        backend.set("note-1", &Note::new("first")).await.unwrap();
        assert_eq!(backend.get("note-1").await.unwrap(), Note::new("first"));

        backend.set("note-1", &Note::new("second")).await.unwrap();
        assert_eq!(backend.get("note-1").await.unwrap(), Note::new("second"));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let backend = MemoryBackend::new();

        let err = backend.get("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "missing"));
    }

    #[tokio::test]
    async fn test_keys_are_lexicographic() {
        let backend = MemoryBackend::new();

        for id in ["c", "a", "b"] {
            backend.set(id, &Note::new(id)).await.unwrap();
        }

        assert_eq!(backend.keys().await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_matches_keys_order() {
        let backend = MemoryBackend::new();

        backend.set("b", &Note::new("bee")).await.unwrap();
        backend.set("a", &Note::new("ay")).await.unwrap();

        let notes = backend.list().await.unwrap();
        assert_eq!(notes, vec![Note::new("ay"), Note::new("bee")]);
    }

    #[tokio::test]
    async fn test_health_check() {
        let backend = MemoryBackend::new();
        assert!(backend.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_clone_shares_data() {
        let backend1 = MemoryBackend::new();
        let backend2 = backend1.clone();

        backend1.set("shared", &Note::new("value")).await.unwrap();

        assert_eq!(backend2.get("shared").await.unwrap(), Note::new("value"));
        assert!(!backend2.is_empty());
    }

    #[tokio::test]
    async fn test_debug_shows_count_not_contents() {
        let backend = MemoryBackend::new();
        backend.set("secret", &Note::new("do not print")).await.unwrap();

        let debug = format!("{backend:?}");
        assert_eq!(debug, "MemoryBackend { notes: 1 }");
    }
}
