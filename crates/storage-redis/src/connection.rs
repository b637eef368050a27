//! The Redis commands the note backend needs, as a trait.
//!
//! [`RedisBackend`](crate::RedisBackend) talks to Redis only through
//! [`RedisConnection`]. Production uses the `redis` crate's
//! [`ConnectionManager`]; tests plug in `FakeRedis` from the `testutil`
//! module to inject malformed values and outages.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};

/// Raw byte-level access to a Redis keyspace.
#[async_trait]
pub trait RedisConnection: Send + Sync {
    /// `GET key`. `None` for a nil reply.
    async fn get(&self, key: &str) -> RedisResult<Option<Vec<u8>>>;

    /// `SET key value`.
    async fn set(&self, key: &str, value: Vec<u8>) -> RedisResult<()>;

    /// `KEYS pattern`.
    ///
    /// Keys are returned as raw bytes: Redis does not require them to be UTF-8.
    async fn keys(&self, pattern: &str) -> RedisResult<Vec<Vec<u8>>>;

    /// `PING`.
    async fn ping(&self) -> RedisResult<()>;
}

// ConnectionManager is a multiplexed handle; commands need `&mut`, so each
// call works on a cheap clone.
#[async_trait]
impl RedisConnection for ConnectionManager {
    async fn get(&self, key: &str) -> RedisResult<Option<Vec<u8>>> {
        let mut con = self.clone();
        AsyncCommands::get(&mut con, key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> RedisResult<()> {
        let mut con = self.clone();
        AsyncCommands::set(&mut con, key, value).await
    }

    async fn keys(&self, pattern: &str) -> RedisResult<Vec<Vec<u8>>> {
        let mut con = self.clone();
        AsyncCommands::keys(&mut con, pattern).await
    }

    async fn ping(&self) -> RedisResult<()> {
        let mut con = self.clone();
        let _pong: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(())
    }
}
