//! Shared test utilities for Redis backend testing.
//!
//! [`FakeRedis`] is an in-process [`RedisConnection`] with just enough of
//! Redis's behavior for the note backend: byte values, `KEYS` glob matching,
//! and a switch that makes every command fail like an unreachable server.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! note-api-storage-redis = { path = "../storage-redis", features = ["testutil"] }
//! ```
//!
//! ```no_run
//! // Requires the `testutil` feature to be enabled.
//! use note_api_storage_redis::testutil::fake_backend;
//!
//! let (fake, backend) = fake_backend("notes:");
//! fake.insert_raw("notes:broken", b"not json".to_vec());
//! ```

use std::{
    collections::BTreeMap,
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use parking_lot::Mutex;
use redis::{RedisError, RedisResult};

use crate::{backend::RedisBackend, connection::RedisConnection};

/// In-process stand-in for a Redis server.
#[derive(Debug, Default)]
pub struct FakeRedis {
    data: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl FakeRedis {
    /// Creates an empty fake server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes under `key`, bypassing note encoding.
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.insert_raw_key(key.as_bytes().to_vec(), value);
    }

    /// Stores raw bytes under a raw (possibly non-UTF-8) key.
    pub fn insert_raw_key(&self, key: Vec<u8>, value: Vec<u8>) {
        self.data.lock().insert(key, value);
    }

    /// Returns the raw bytes stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.lock().get(key.as_bytes()).cloned()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Makes every subsequent command fail with a refused connection
    /// (`true`) or succeed again (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RedisResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RedisError::from(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused (fake outage)",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RedisConnection for FakeRedis {
    async fn get(&self, key: &str) -> RedisResult<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self.data.lock().get(key.as_bytes()).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> RedisResult<()> {
        self.check_available()?;
        self.data.lock().insert(key.as_bytes().to_vec(), value);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> RedisResult<Vec<Vec<u8>>> {
        self.check_available()?;
        let data = self.data.lock();
        Ok(data
            .keys()
            .filter(|key| match std::str::from_utf8(key) {
                Ok(key) => glob_match(pattern, key),
                // A non-UTF-8 key can only be matched by the catch-all pattern.
                Err(_) => pattern == "*",
            })
            .cloned()
            .collect())
    }

    async fn ping(&self) -> RedisResult<()> {
        self.check_available()
    }
}

/// Creates a [`RedisBackend`] over a fresh [`FakeRedis`].
///
/// The fake is returned alongside so tests can plant raw values or simulate
/// an outage.
#[must_use]
pub fn fake_backend(key_prefix: &str) -> (Arc<FakeRedis>, RedisBackend) {
    let fake = Arc::new(FakeRedis::new());
    let connection: Arc<dyn RedisConnection> = fake.clone();
    let backend = RedisBackend::from_connection(connection, key_prefix);
    (fake, backend)
}

/// Matches `key` against a Redis glob pattern.
///
/// Supports `*`, `?` and `\`-escapes, which is everything the note backend
/// generates. Character classes are not supported.
#[must_use]
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();
    glob_match_from(&pattern, &key)
}

fn glob_match_from(pattern: &[char], key: &[char]) -> bool {
    match pattern.split_first() {
        None => key.is_empty(),
        Some(('*', rest)) => (0..=key.len()).any(|skip| glob_match_from(rest, &key[skip..])),
        Some(('?', rest)) => !key.is_empty() && glob_match_from(rest, &key[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            key.first() == rest.first() && glob_match_from(&rest[1..], &key[1..])
        },
        Some((literal, rest)) => key.first() == Some(literal) && glob_match_from(rest, &key[1..]),
    }
}
