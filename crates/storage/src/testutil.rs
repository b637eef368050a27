//! Shared test utilities for note backend testing.
//!
//! This module provides helpers for generating test notes and asserting on
//! [`StorageResult`](crate::StorageResult) values. The conformance suite and
//! the stress tests build their ids and notes with it. It is feature-gated
//! behind `testutil` to prevent leaking into production builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! note-api-storage = { path = "../storage", features = ["testutil"] }
//! ```
//!
//! Then import helpers:
//!
//! ```no_run
//! // Requires the `testutil` feature to be enabled.
//! use note_api_storage::testutil::{make_id, make_note, populated_backend};
//! ```

use crate::{backend::NoteBackend, memory::MemoryBackend, types::Note};

/// Create a deterministic note id from a prefix and index.
///
/// Produces ids like `"prefix-000042"`. The zero-padding keeps lexicographic
/// order equal to numeric order.
#[must_use]
pub fn make_id(prefix: &str, idx: usize) -> String {
    format!("{prefix}-{idx:06}")
}

/// Create a note whose body identifies the index it was made for.
#[must_use]
pub fn make_note(idx: usize) -> Note {
    Note::new(format!("note body {idx}"))
}

/// Create a [`MemoryBackend`] pre-populated with `count` notes.
///
/// Ids come from [`make_id`] and bodies from [`make_note`].
///
/// # Panics
///
/// Panics if any `set` operation fails (should not happen with `MemoryBackend`).
pub async fn populated_backend(prefix: &str, count: usize) -> MemoryBackend {
    let backend = MemoryBackend::new();
    for i in 0..count {
        backend.set(&make_id(prefix, i), &make_note(i)).await.expect("populate set failed");
    }
    backend
}

/// Assert that a [`StorageResult`](crate::StorageResult) is a [`StorageError::NotFound`](crate::StorageError::NotFound).
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use note_api_storage::{assert_not_found, StorageError, StorageResult};
///
/// let result: StorageResult<()> = Err(StorageError::not_found("missing"));
/// assert_not_found!(result);
/// ```
#[macro_export]
macro_rules! assert_not_found {
    ($result:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::NotFound { .. })),
            "expected StorageError::NotFound, got: {:?}",
            $result,
        );
    };
    ($result:expr, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::NotFound { .. })),
            "{}: expected StorageError::NotFound, got: {:?}",
            $msg,
            $result,
        );
    };
}

/// Assert that a [`StorageResult`](crate::StorageResult) is a [`StorageError::Unavailable`](crate::StorageError::Unavailable).
#[macro_export]
macro_rules! assert_unavailable {
    ($result:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Unavailable { .. })),
            "expected StorageError::Unavailable, got: {:?}",
            $result,
        );
    };
    ($result:expr, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Unavailable { .. })),
            "{}: expected StorageError::Unavailable, got: {:?}",
            $msg,
            $result,
        );
    };
}

/// Assert that a [`StorageResult`](crate::StorageResult) is a [`StorageError::Serialization`](crate::StorageError::Serialization).
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use note_api_storage::{assert_serialization, StorageError, StorageResult};
///
/// let result: StorageResult<()> = Err(StorageError::serialization("bad bytes"));
/// assert_serialization!(result);
/// ```
#[macro_export]
macro_rules! assert_serialization {
    ($result:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Serialization { .. })),
            "expected StorageError::Serialization, got: {:?}",
            $result,
        );
    };
    ($result:expr, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Serialization { .. })),
            "{}: expected StorageError::Serialization, got: {:?}",
            $msg,
            $result,
        );
    };
}

/// Assert that a [`StorageResult`](crate::StorageResult) is `Ok`.
///
/// Returns the inner value on success, panics with a descriptive message
/// on failure.
#[macro_export]
macro_rules! assert_storage_ok {
    ($result:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => panic!("expected Ok, got StorageError: {e:?}"),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => panic!("{}: expected Ok, got StorageError: {e:?}", $msg),
        }
    };
}
