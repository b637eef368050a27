//! Process-wide backend selection.
//!
//! [`BackendSelector`] holds at most one [`Backend`]. The first caller of
//! [`get`](BackendSelector::get) reads the configuration, builds the backend
//! and checks its health; every concurrent caller waits for that one
//! initialization and then sees the same instance. A failed initialization
//! installs nothing, so a later call tries again.
//!
//! The process-wide instance is [`global`]. Tests build their own selectors.

use std::future::Future;

use note_api_storage::{MemoryBackend, NoteBackend};
use note_api_storage_gcs::ObjectStoreBackend;
use note_api_storage_redis::RedisBackend;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::{backend_enum::Backend, config::BackendConfig, error::StartupError};

static GLOBAL: BackendSelector = BackendSelector::new();

/// Returns the process-wide selector.
#[must_use]
pub fn global() -> &'static BackendSelector {
    &GLOBAL
}

/// Lazily initialized holder of the single active backend.
#[derive(Debug)]
pub struct BackendSelector {
    cell: OnceCell<Backend>,
}

impl BackendSelector {
    /// Creates an empty selector.
    #[must_use]
    pub const fn new() -> Self {
        Self { cell: OnceCell::const_new() }
    }

    /// Creates a selector with `backend` already installed.
    #[must_use]
    pub fn with_backend(backend: Backend) -> Self {
        Self { cell: OnceCell::new_with(Some(backend)) }
    }

    /// Returns the active backend, building it from the environment on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError`] if the configuration is invalid, the
    /// backend cannot be constructed, or its health check fails.
    pub async fn get(&self) -> Result<&Backend, StartupError> {
        self.get_or_try_init(|| async { build_backend(BackendConfig::from_env()?).await }).await
    }

    /// Returns the active backend, running `init` if none is installed.
    ///
    /// At most one `init` runs at a time. Callers that arrive while it runs
    /// wait for it and share its result.
    ///
    /// # Errors
    ///
    /// Returns the error from `init`; nothing is installed in that case.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<&Backend, StartupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Backend, StartupError>>,
    {
        self.cell.get_or_try_init(init).await
    }

    /// Returns the active backend if one is installed, without initializing.
    #[must_use]
    pub fn try_get(&self) -> Option<&Backend> {
        self.cell.get()
    }
}

impl Default for BackendSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Constructs the configured backend and verifies it can serve requests.
///
/// # Errors
///
/// Returns a [`StartupError`] if construction or the health check fails.
#[instrument(skip(config), fields(backend = %config.kind()))]
pub async fn build_backend(config: BackendConfig) -> Result<Backend, StartupError> {
    let backend = match config {
        BackendConfig::Memory => Backend::Memory(MemoryBackend::new()),
        BackendConfig::Redis(redis) => Backend::Redis(RedisBackend::connect(&redis).await?),
        BackendConfig::Gcs(gcs) => Backend::Gcs(ObjectStoreBackend::connect(&gcs)?),
    };

    backend.health_check().await?;
    info!(backend = %backend.kind(), "storage backend installed");
    Ok(backend)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use note_api_storage::{Note, StorageError};
    use note_api_storage_redis::testutil::fake_backend;

    use super::*;
    use crate::config::BackendKind;

    fn leak(selector: BackendSelector) -> &'static BackendSelector {
        Box::leak(Box::new(selector))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_access_builds_one_backend() {
        let selector = leak(BackendSelector::new());
        let constructions = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..32 {
            let constructions = Arc::clone(&constructions);
            handles.push(tokio::spawn(async move {
                let backend = selector
                    .get_or_try_init(|| async move {
                        constructions.fetch_add(1, Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        Ok(Backend::memory())
                    })
                    .await
                    .expect("init should succeed");
                backend as *const Backend as usize
            }));
        }

        let mut addresses = Vec::new();
        for handle in handles {
            addresses.push(handle.await.expect("task join"));
        }

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]), "callers saw different backends");
    }

    #[tokio::test]
    async fn writes_are_visible_through_every_access() {
        let selector = BackendSelector::new();
        let first =
            selector.get_or_try_init(|| async { Ok(Backend::memory()) }).await.expect("init");
        first.set("a", &Note::new("1")).await.expect("set");

        let second = selector
            .get_or_try_init(|| async {
                Err(StartupError::from(StorageError::unavailable("initializer ran twice")))
            })
            .await
            .expect("installed");
        assert_eq!(second.get("a").await.expect("get"), Note::new("1"));
    }

    #[tokio::test]
    async fn failed_initialization_is_not_cached() {
        let selector = BackendSelector::new();

        let err = selector
            .get_or_try_init(|| async {
                Err(StartupError::from(StorageError::unavailable("redis down")))
            })
            .await
            .expect_err("init should fail");
        assert!(matches!(err, StartupError::Storage(ref e) if e.is_unavailable()));
        assert!(selector.try_get().is_none());

        let backend =
            selector.get_or_try_init(|| async { Ok(Backend::memory()) }).await.expect("retry");
        assert_eq!(backend.kind(), BackendKind::Memory);
    }

    #[tokio::test]
    async fn preinstalled_backend_skips_initialization() {
        let selector = BackendSelector::with_backend(Backend::Redis(fake_backend("").1));

        let backend = selector.get().await.expect("preinstalled backend");
        assert_eq!(backend.kind(), BackendKind::Redis);
    }

    #[tokio::test]
    async fn build_backend_memory_is_healthy() {
        let backend = build_backend(BackendConfig::Memory).await.expect("memory backend");
        assert_eq!(backend.kind(), BackendKind::Memory);
        assert!(backend.keys().await.expect("keys").is_empty());
    }

    #[tokio::test]
    async fn global_selector_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
    }
}
