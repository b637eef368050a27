//! Note storage abstraction for note-api.
//!
//! This crate provides the [`NoteBackend`] trait and related types that every
//! note-api storage backend implements, plus the in-memory reference backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HTTP handlers (note-api)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 BackendSelector (note-api)                  │
//! │        reads BACKEND once, installs a single Backend        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   note-api-storage                          │
//! │               NoteBackend trait, Note, errors               │
//! ├───────────────┬───────────────────┬─────────────────────────┤
//! │ MemoryBackend │   RedisBackend    │   ObjectStoreBackend    │
//! │  (this crate) │ (storage-redis)   │    (storage-gcs)        │
//! └───────────────┴───────────────────┴─────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use note_api_storage::{MemoryBackend, Note, NoteBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set("abc-123", &Note::new("hello")).await?;
//!
//!     let note = backend.get("abc-123").await?;
//!     assert_eq!(note.text, "hello");
//!
//!     let all = backend.list().await?;
//!     assert_eq!(all, vec![Note::new("hello")]);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Backends
//!
//! | Backend | Medium | Lifetime of a note |
//! |---------|--------|--------------------|
//! | [`MemoryBackend`] | Process memory | Until the process exits |
//! | `RedisBackend` (in `note-api-storage-redis`) | Redis | Until Redis evicts it |
//! | `ObjectStoreBackend` (in `note-api-storage-gcs`) | Google Cloud Storage | Bucket retention |
//!
//! # Error Handling
//!
//! All operations return [`StorageResult<T>`]. Backends map their internal
//! errors onto the three [`StorageError`] kinds.
//!
//! # Feature Flags
//!
//! - **`testutil`**: Enables the `testutil` module (note generators, assertion macros) and the
//!   `conformance` suite. Enable this in `[dev-dependencies]` for backend integration tests.

#![deny(unsafe_code)]

pub mod backend;
pub mod codec;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod conformance;
pub mod error;
pub mod memory;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;
pub mod types;

// Re-export primary types at crate root for convenience
pub use backend::NoteBackend;
pub use codec::{decode_note, encode_note};
pub use error::{BoxError, ConfigError, StorageError, StorageResult};
pub use memory::MemoryBackend;
pub use types::{CreateNoteRequest, Note};
