//! Conformance test suite for [`NoteBackend`] implementations.
//!
//! This module provides async test functions that validate whether a
//! [`NoteBackend`] implementation satisfies the trait contract. The memory,
//! Redis, and object-store backends all run the same suite so they stay
//! interchangeable.
//!
//! # Usage
//!
//! Enable the `testutil` feature and call each conformance function with a
//! fresh backend instance:
//!
//! ```no_run
//! use note_api_storage::{conformance, MemoryBackend};
//!
//! #[tokio::test]
//! async fn crud_get_missing_is_not_found() {
//!     conformance::crud_get_missing_is_not_found(&MemoryBackend::new()).await;
//! }
//! ```
//!
//! # Test Categories
//!
//! | Category | Functions | Contract aspect |
//! |----------|-----------|-----------------|
//! | CRUD | 7 tests | get/set round trip, overwrite, NotFound |
//! | Keys | 4 tests | `keys` is exactly the set of stored ids; `list` follows it |
//! | Concurrent | 2 tests | No lost updates under parallel callers |
//!
//! The keys tests expect an empty backend, so [`run_all`] runs them first.

use std::{collections::BTreeSet, sync::Arc};

use crate::{
    assert_not_found, assert_storage_ok,
    backend::NoteBackend,
    testutil::{make_id, make_note},
    types::Note,
};

// ============================================================================
// CRUD: get/set semantics (7 tests)
// ============================================================================

/// `get` on an id that was never set fails with `NotFound`.
pub async fn crud_get_missing_is_not_found<B: NoteBackend>(backend: &B) {
    let result = backend.get("crud-never-set").await;
    assert_not_found!(result, "get of an unset id");
}

/// `set` then `get` returns an equal note.
pub async fn crud_set_then_get_returns_note<B: NoteBackend>(backend: &B) {
    let note = Note::new("hello");
    assert_storage_ok!(backend.set("crud-roundtrip", &note).await, "set");
    let stored = assert_storage_ok!(backend.get("crud-roundtrip").await, "get");
    assert_eq!(stored, note);
}

/// Every field of a note survives the round trip.
pub async fn crud_all_fields_round_trip<B: NoteBackend>(backend: &B) {
    let note = Note::new("body with\nnewlines and ✓ unicode")
        .with_title("A title")
        .with_metadata("author", "ada")
        .with_metadata("tags", "a,b,c");
    backend.set("crud-fields", &note).await.expect("set");
    assert_eq!(backend.get("crud-fields").await.expect("get"), note);
}

/// The second of two writes to the same id wins.
pub async fn crud_set_overwrites_existing<B: NoteBackend>(backend: &B) {
    backend.set("crud-overwrite", &Note::new("original")).await.expect("set");
    backend.set("crud-overwrite", &Note::new("updated")).await.expect("overwrite");
    let stored = backend.get("crud-overwrite").await.expect("get");
    assert_eq!(stored, Note::new("updated"));
}

/// Repeating the same `set` leaves the same observable state.
pub async fn crud_set_is_idempotent<B: NoteBackend>(backend: &B) {
    let note = Note::new("same").with_title("twice");
    backend.set("crud-idem", &note).await.expect("first set");
    let keys_after_first = backend.keys().await.expect("keys");
    backend.set("crud-idem", &note).await.expect("second set");

    assert_eq!(backend.get("crud-idem").await.expect("get"), note);
    let keys_after_second = backend.keys().await.expect("keys");
    assert_eq!(
        keys_after_first.iter().collect::<BTreeSet<_>>(),
        keys_after_second.iter().collect::<BTreeSet<_>>(),
        "repeating a set must not change the keyspace"
    );
}

/// Ids with separators, spaces, percent signs and non-ASCII characters are
/// stored and returned verbatim.
pub async fn crud_unusual_ids_round_trip<B: NoteBackend>(backend: &B) {
    let ids = ["crud/with/slash", "crud with space", "crud%2Fescaped", "crud.dot", "crud-ünï-✓"];
    for id in ids {
        backend.set(id, &Note::new(id)).await.expect("set unusual id");
    }
    for id in ids {
        assert_eq!(backend.get(id).await.expect("get unusual id"), Note::new(id), "id {id:?}");
    }

    let keys: BTreeSet<String> = backend.keys().await.expect("keys").into_iter().collect();
    for id in ids {
        assert!(keys.contains(id), "keys should contain {id:?}, got {keys:?}");
    }
}

/// Large note bodies (1 MiB) round-trip correctly.
pub async fn crud_large_note_round_trip<B: NoteBackend>(backend: &B) {
    let note = Note::new("x".repeat(1_048_576));
    backend.set("crud-large", &note).await.expect("set large note");
    let stored = backend.get("crud-large").await.expect("get large note");
    assert_eq!(stored.text.len(), note.text.len(), "large note length mismatch");
    assert_eq!(stored, note);
}

// ============================================================================
// Keys: keyspace snapshot (4 tests)
// ============================================================================

/// A fresh backend has no keys and lists no notes.
pub async fn keys_empty_on_fresh_backend<B: NoteBackend>(backend: &B) {
    assert!(backend.keys().await.expect("keys").is_empty(), "fresh backend should have no keys");
    assert!(backend.list().await.expect("list").is_empty(), "fresh backend should list nothing");
}

/// After two sets on an empty backend, `keys` is exactly those two ids.
pub async fn keys_returns_exactly_stored_ids<B: NoteBackend>(backend: &B) {
    backend.set("keys-one", &Note::new("1")).await.expect("set one");
    backend.set("keys-two", &Note::new("2")).await.expect("set two");

    let keys: BTreeSet<String> = backend.keys().await.expect("keys").into_iter().collect();
    let expected: BTreeSet<String> = ["keys-one", "keys-two"].map(String::from).into();
    assert_eq!(keys, expected);
}

/// Overwriting an id does not duplicate it in `keys`.
pub async fn keys_have_no_duplicates<B: NoteBackend>(backend: &B) {
    for i in 0..3 {
        backend.set("keys-dup", &Note::new(format!("v{i}"))).await.expect("set");
    }
    let keys = backend.keys().await.expect("keys");
    let occurrences = keys.iter().filter(|k| *k == "keys-dup").count();
    assert_eq!(occurrences, 1, "overwritten id should appear once, got {keys:?}");
}

/// `list` returns one note per key, in `keys` order.
pub async fn list_follows_keys_order<B: NoteBackend>(backend: &B) {
    for id in ["list-c", "list-a", "list-b"] {
        backend.set(id, &Note::new(format!("note {id}"))).await.expect("set");
    }

    let keys = backend.keys().await.expect("keys");
    let notes = backend.list().await.expect("list");
    assert_eq!(keys.len(), notes.len(), "list should return one note per key");

    for (key, note) in keys.iter().zip(&notes) {
        let expected = backend.get(key).await.expect("get");
        assert_eq!(note, &expected, "list entry for {key} should match get");
    }
}

// ============================================================================
// Concurrent access: parallel callers (2 tests)
// ============================================================================

/// Concurrent sets to different ids all succeed and are all retrievable.
///
/// Requires `B: 'static` so the backend can be shared across spawned tasks
/// via `Arc`.
pub async fn concurrent_sets_to_different_ids<B: NoteBackend + 'static>(backend: Arc<B>) {
    let mut handles = Vec::new();
    for i in 0..50 {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move {
            backend.set(&make_id("conc", i), &make_note(i)).await.expect("concurrent set");
        }));
    }
    for handle in handles {
        handle.await.expect("task join");
    }

    let keys: BTreeSet<String> = backend.keys().await.expect("keys").into_iter().collect();
    for i in 0..50 {
        let id = make_id("conc", i);
        let note = backend.get(&id).await.expect("get after concurrent sets");
        assert_eq!(note, make_note(i));
        assert!(keys.contains(&id), "keys should contain {id}");
    }
}

/// Concurrent reads of the same id all return the same note.
pub async fn concurrent_reads_return_consistent_note<B: NoteBackend + 'static>(backend: Arc<B>) {
    backend.set("cread-note", &Note::new("stable")).await.expect("set");

    let mut handles = Vec::new();
    for _ in 0..50 {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move {
            backend.get("cread-note").await.expect("concurrent get")
        }));
    }

    for handle in handles {
        let note = handle.await.expect("task join");
        assert_eq!(note, Note::new("stable"));
    }
}

// ============================================================================
// Convenience runner: run all conformance tests against a single backend
// ============================================================================

/// Run the full conformance suite against the given backend.
///
/// The backend must start empty. Keys tests run first because they assert
/// on the exact keyspace.
///
/// ```no_run
/// use std::sync::Arc;
/// use note_api_storage::{conformance, MemoryBackend};
///
/// #[tokio::test]
/// async fn memory_backend_conformance() {
///     conformance::run_all(Arc::new(MemoryBackend::new())).await;
/// }
/// ```
pub async fn run_all<B: NoteBackend + 'static>(backend: Arc<B>) {
    // Keys (need an empty backend)
    keys_empty_on_fresh_backend(backend.as_ref()).await;
    keys_returns_exactly_stored_ids(backend.as_ref()).await;
    keys_have_no_duplicates(backend.as_ref()).await;
    list_follows_keys_order(backend.as_ref()).await;

    // CRUD
    crud_get_missing_is_not_found(backend.as_ref()).await;
    crud_set_then_get_returns_note(backend.as_ref()).await;
    crud_all_fields_round_trip(backend.as_ref()).await;
    crud_set_overwrites_existing(backend.as_ref()).await;
    crud_set_is_idempotent(backend.as_ref()).await;
    crud_unusual_ids_round_trip(backend.as_ref()).await;
    crud_large_note_round_trip(backend.as_ref()).await;

    // Concurrent
    concurrent_sets_to_different_ids(Arc::clone(&backend)).await;
    concurrent_reads_return_consistent_note(Arc::clone(&backend)).await;
}
