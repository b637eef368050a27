//! HTTP note service over interchangeable storage backends.
//!
//! The service exposes notes at `/notes` and stores them in whichever
//! backend the `BACKEND` environment variable selects:
//!
//! | `BACKEND` | Backend | Settings |
//! |-----------|---------|----------|
//! | `memory` (default) | process memory | none |
//! | `redis` | Redis | `REDIS_HOST`, `REDIS_PORT`, `REDIS_DB`, `REDIS_PASSWORD`, `REDIS_KEY_PREFIX` |
//! | `gcs` | Google Cloud Storage | `GCS_BUCKET`, `GCS_PREFIX`, `GOOGLE_APPLICATION_CREDENTIALS` |
//!
//! An unrecognized `BACKEND` value falls back to memory with a warning.
//! The backend is built once per process by the [`BackendSelector`].

#![deny(unsafe_code)]

pub mod backend_enum;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod selector;
pub mod telemetry;

pub use backend_enum::Backend;
pub use config::{BackendConfig, BackendKind, ServerConfig};
pub use error::{ApiError, StartupError};
pub use router::router;
pub use selector::{build_backend, BackendSelector};
