//! Object-store backed note backend implementation.
//!
//! This module provides [`ObjectStoreBackend`], which implements
//! [`NoteBackend`] over any [`ObjectStore`]. Production wires it to Google
//! Cloud Storage; tests use the in-memory store.
//!
//! # Consistency
//!
//! Each note is one whole-object upload, so readers never see a partially
//! written note. How soon another process observes a `set` depends on the
//! store's read-after-write guarantees. GCS is strongly consistent for
//! object reads and listings.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use note_api_storage::{decode_note, encode_note, Note, NoteBackend, StorageError, StorageResult};
use object_store::{gcp::GoogleCloudStorageBuilder, path::Path, ObjectMeta, ObjectStore, PutPayload};
use tracing::{instrument, warn};

use crate::{
    config::GcsBackendConfig,
    error::{GcsStorageError, Result},
    keys::{note_id, object_path},
};

/// Object-store implementation of [`NoteBackend`].
///
/// # Error Mapping
///
/// | Situation | Error |
/// |-----------|-------|
/// | No object for the id | [`StorageError::NotFound`] |
/// | Transport, authentication or other client failure | [`StorageError::Unavailable`] |
/// | Object content is not a note, or the id has no object name | [`StorageError::Serialization`] |
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use note_api_storage::{Note, NoteBackend};
/// use note_api_storage_gcs::ObjectStoreBackend;
/// use object_store::{memory::InMemory, path::Path};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let backend = ObjectStoreBackend::from_store(Arc::new(InMemory::new()), Path::from("notes"));
///
/// backend.set("abc", &Note::new("hello")).await.unwrap();
/// assert_eq!(backend.keys().await.unwrap(), vec!["abc".to_string()]);
/// # });
/// ```
#[derive(Clone)]
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
    prefix: Path,
}

impl std::fmt::Debug for ObjectStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreBackend")
            .field("store", &self.store.to_string())
            .field("prefix", &self.prefix.as_ref())
            .finish()
    }
}

impl ObjectStoreBackend {
    /// Creates a backend over the Google Cloud Storage bucket in `config`.
    ///
    /// Credentials come from `service_account_path` when set, otherwise from
    /// the environment variables `object_store` understands.
    ///
    /// # Errors
    ///
    /// Returns [`GcsStorageError::Store`] if the client cannot be built, or
    /// [`GcsStorageError::Config`] if the prefix is not a valid object path.
    pub fn connect(config: &GcsBackendConfig) -> Result<Self> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(config.bucket());
        if let Some(path) = config.service_account_path() {
            builder = builder.with_service_account_path(path);
        }
        let store = builder.build()?;
        let prefix = config.prefix_path()?;

        tracing::info!(bucket = %config.bucket(), prefix = %prefix, "configured GCS note store");

        Ok(Self::from_store(Arc::new(store), prefix))
    }

    /// Creates a backend over an existing store.
    #[must_use]
    pub fn from_store(store: Arc<dyn ObjectStore>, prefix: Path) -> Self {
        Self { store, prefix }
    }

    /// Returns the object name prefix.
    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }
}

/// Maps a failure while reading the object for `id`.
///
/// A missing object reports the note id, whether the store noticed at the
/// request or while the body was streaming.
fn read_error(id: &str, error: object_store::Error) -> StorageError {
    match error {
        object_store::Error::NotFound { .. } => StorageError::not_found(id),
        other => GcsStorageError::from(other).into(),
    }
}

#[async_trait]
impl NoteBackend for ObjectStoreBackend {
    #[instrument(skip(self), fields(backend = "gcs"))]
    async fn get(&self, id: &str) -> StorageResult<Note> {
        let location = object_path(&self.prefix, id)?;

        let result = self.store.get(&location).await.map_err(|e| read_error(id, e))?;
        let bytes = result.bytes().await.map_err(|e| read_error(id, e))?;

        decode_note(id, &bytes)
    }

    #[instrument(skip(self, note), fields(backend = "gcs"))]
    async fn set(&self, id: &str, note: &Note) -> StorageResult<()> {
        let location = object_path(&self.prefix, id)?;
        let body = encode_note(note)?;

        self.store.put(&location, PutPayload::from(body)).await.map_err(GcsStorageError::from)?;
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "gcs"))]
    async fn keys(&self) -> StorageResult<Vec<String>> {
        let objects: Vec<ObjectMeta> = self
            .store
            .list(Some(&self.prefix))
            .try_collect()
            .await
            .map_err(GcsStorageError::from)?;

        let mut ids = Vec::with_capacity(objects.len());
        for object in objects {
            match note_id(&self.prefix, &object.location) {
                Some(id) => ids.push(id),
                None => {
                    warn!(location = %object.location, "skipping foreign object under note prefix");
                },
            }
        }
        Ok(ids)
    }

    #[instrument(skip(self), fields(backend = "gcs"))]
    async fn health_check(&self) -> StorageResult<()> {
        // One delimited listing proves the bucket exists and credentials work
        self.store.list_with_delimiter(Some(&self.prefix)).await.map_err(GcsStorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use note_api_storage::{assert_not_found, assert_serialization};

    use super::*;
    use crate::testutil::{in_memory_backend, put_raw};

    #[tokio::test]
    async fn test_set_writes_json_object_under_prefix() {
        let (store, backend) = in_memory_backend("notes");
        backend.set("a/b", &Note::new("hello").with_title("t")).await.unwrap();

        let raw = store.get(&Path::parse("notes/a%2Fb").unwrap()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw.bytes().await.unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hello", "title": "t" }));
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found_for_the_id() {
        let (_store, backend) = in_memory_backend("notes");

        let err = backend.get("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "missing"));
    }

    #[test]
    fn test_read_error_reports_note_id_not_object_path() {
        let vanished = object_store::Error::NotFound {
            path: "notes/a%2Fb".to_string(),
            source: "object deleted mid-read".into(),
        };

        let err = read_error("a/b", vanished);
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "a/b"), "{err:?}");
    }

    #[test]
    fn test_read_error_keeps_other_failures_unavailable() {
        let failure = object_store::Error::Generic {
            store: "GCS",
            source: "connection reset".into(),
        };

        assert!(read_error("a", failure).is_unavailable());
    }

    #[test]
    fn test_prefix_accessor() {
        let (_store, backend) = in_memory_backend("tenant/notes");
        assert_eq!(backend.prefix().as_ref(), "tenant/notes");
    }

    #[tokio::test]
    async fn test_malformed_object_is_serialization() {
        let (store, backend) = in_memory_backend("notes");
        put_raw(&store, "notes/broken", b"{ definitely not a note").await;

        assert_serialization!(backend.get("broken").await);
    }

    #[tokio::test]
    async fn test_empty_id_is_serialization() {
        let (_store, backend) = in_memory_backend("notes");

        assert_serialization!(backend.set("", &Note::new("x")).await);
        assert_serialization!(backend.get("").await);
    }

    #[tokio::test]
    async fn test_keys_skip_foreign_objects() {
        let (store, backend) = in_memory_backend("notes");
        put_raw(&store, "notes/nested/deeper", b"{}").await;
        put_raw(&store, "notes/readme.md", b"hi").await;
        put_raw(&store, "elsewhere/x", b"{}").await;

        backend.set("real", &Note::new("x")).await.unwrap();

        assert_eq!(backend.keys().await.unwrap(), vec!["real"]);
    }

    #[tokio::test]
    async fn test_prefixes_are_isolated() {
        let store: Arc<dyn ObjectStore> = Arc::new(object_store::memory::InMemory::new());
        let a = ObjectStoreBackend::from_store(Arc::clone(&store), Path::from("a"));
        let b = ObjectStoreBackend::from_store(Arc::clone(&store), Path::from("b"));

        a.set("shared-id", &Note::new("from a")).await.unwrap();

        assert_not_found!(b.get("shared-id").await);
        assert!(b.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_check_on_empty_store() {
        let (_store, backend) = in_memory_backend("notes");
        assert!(backend.health_check().await.is_ok());
    }
}
