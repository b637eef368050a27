//! Shared test utilities for object-store backend testing.
//!
//! Backends built here run over [`InMemory`], so tests need no bucket or
//! credentials. The store is returned alongside the backend for planting
//! foreign or malformed objects.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! note-api-storage-gcs = { path = "../storage-gcs", features = ["testutil"] }
//! ```

use std::sync::Arc;

use object_store::{memory::InMemory, path::Path, ObjectStore, PutPayload};

use crate::backend::ObjectStoreBackend;

/// Creates an [`ObjectStoreBackend`] over a fresh in-memory store.
#[must_use]
pub fn in_memory_backend(prefix: &str) -> (Arc<InMemory>, ObjectStoreBackend) {
    let store = Arc::new(InMemory::new());
    let backend = ObjectStoreBackend::from_store(store.clone(), Path::from(prefix));
    (store, backend)
}

/// Uploads raw bytes to `location`, bypassing note encoding.
///
/// # Panics
///
/// Panics if `location` is not a valid object path or the upload fails.
pub async fn put_raw(store: &InMemory, location: &str, bytes: &[u8]) {
    let location = Path::parse(location).expect("valid object path");
    store.put(&location, PutPayload::from(bytes.to_vec())).await.expect("raw upload");
}
