//! Configuration for the Redis note backend.
//!
//! [`RedisBackendConfig`] describes which Redis server to reach and how note
//! ids are namespaced inside its keyspace.

use note_api_storage::ConfigError;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Default Redis host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Redis port.
pub const DEFAULT_PORT: u16 = 6379;

/// Default logical database index.
pub const DEFAULT_DB: i64 = 0;

/// Environment variable holding the Redis host.
pub const ENV_HOST: &str = "REDIS_HOST";
/// Environment variable holding the Redis port.
pub const ENV_PORT: &str = "REDIS_PORT";
/// Environment variable holding the logical database index.
pub const ENV_DB: &str = "REDIS_DB";
/// Environment variable holding the Redis password.
pub const ENV_PASSWORD: &str = "REDIS_PASSWORD";
/// Environment variable holding the key prefix.
pub const ENV_KEY_PREFIX: &str = "REDIS_KEY_PREFIX";

/// Configuration for [`RedisBackend`](crate::RedisBackend).
///
/// # Key Namespace
///
/// Every note is stored under `key_prefix + id`. With the default empty
/// prefix the backend assumes it owns the whole logical database: `keys`
/// reports every key in it as a note id.
///
/// # Example
///
/// ```
/// use note_api_storage_redis::RedisBackendConfig;
///
/// let config = RedisBackendConfig::builder()
///     .host("cache.internal")
///     .key_prefix("notes:")
///     .build()?;
///
/// assert_eq!(config.url(), "redis://cache.internal:6379/0");
/// # Ok::<(), note_api_storage::ConfigError>(())
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedisBackendConfig {
    /// Server host name or address.
    #[serde(default = "default_host")]
    pub(crate) host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub(crate) port: u16,

    /// Logical database index.
    #[serde(default)]
    pub(crate) db: i64,

    /// Password for `AUTH`, if the server requires one.
    #[serde(default, skip_serializing)]
    pub(crate) password: Option<String>,

    /// Prefix prepended to every note id.
    #[serde(default)]
    pub(crate) key_prefix: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[bon::bon]
impl RedisBackendConfig {
    /// Creates a new configuration, validating every field.
    ///
    /// # Optional Fields
    ///
    /// * `host` - Server host (default: `localhost`).
    /// * `port` - Server port (default: 6379).
    /// * `db` - Logical database index (default: 0).
    /// * `password` - Password for `AUTH` (default: none).
    /// * `key_prefix` - Prefix for every note key (default: empty).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `host` is empty
    /// - `port` is zero
    /// - `db` is negative
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_HOST.to_owned())] host: String,
        #[builder(default = DEFAULT_PORT)] port: u16,
        #[builder(default = DEFAULT_DB)] db: i64,
        #[builder(into)] password: Option<String>,
        #[builder(into, default)] key_prefix: String,
    ) -> Result<Self, ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::invalid(ENV_HOST, "host cannot be empty"));
        }

        if port == 0 {
            return Err(ConfigError::invalid(ENV_PORT, "port must be non-zero"));
        }

        if db < 0 {
            return Err(ConfigError::invalid(ENV_DB, "database index cannot be negative"));
        }

        Ok(Self { host, port, db, password, key_prefix })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads `REDIS_HOST`, `REDIS_PORT`, `REDIS_DB`, `REDIS_PASSWORD` and
    /// `REDIS_KEY_PREFIX`. Unset variables fall back to their defaults; an
    /// empty `REDIS_PASSWORD` counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not
    /// parse or a value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) is this function over `std::env::var`.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(ENV_PORT, format!("{raw:?}: {e}")))?,
            None => DEFAULT_PORT,
        };

        let db = match lookup(ENV_DB) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::invalid(ENV_DB, format!("{raw:?}: {e}")))?,
            None => DEFAULT_DB,
        };

        Self::builder()
            .host(lookup(ENV_HOST).unwrap_or_else(default_host))
            .port(port)
            .db(db)
            .maybe_password(lookup(ENV_PASSWORD).filter(|p| !p.is_empty()))
            .key_prefix(lookup(ENV_KEY_PREFIX).unwrap_or_default())
            .build()
    }

    /// Returns this configuration with a different key prefix.
    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Returns the server host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the server port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the logical database index.
    #[must_use]
    pub fn db(&self) -> i64 {
        self.db
    }

    /// Returns `true` if a password is configured.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Returns the connection URL understood by the `redis` client.
    ///
    /// The password is percent-encoded into the userinfo part. Never log the
    /// result.
    #[must_use]
    pub fn url(&self) -> String {
        let auth = match &self.password {
            Some(password) => format!(":{}@", utf8_percent_encode(password, NON_ALPHANUMERIC)),
            None => String::new(),
        };
        format!("redis://{auth}{}:{}/{}", self.host, self.port, self.db)
    }
}

impl std::fmt::Debug for RedisBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackendConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RedisBackendConfig::builder().build().unwrap();

        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 6379);
        assert_eq!(config.db(), 0);
        assert!(!config.has_password());
        assert_eq!(config.key_prefix(), "");
        assert_eq!(config.url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_validation_empty_host() {
        let result = RedisBackendConfig::builder().host("").build();
        assert_eq!(result.unwrap_err(), ConfigError::invalid(ENV_HOST, "host cannot be empty"));
    }

    #[test]
    fn test_validation_zero_port() {
        let result = RedisBackendConfig::builder().port(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: ENV_PORT, .. })));
    }

    #[test]
    fn test_validation_negative_db() {
        let result = RedisBackendConfig::builder().db(-1).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: ENV_DB, .. })));
    }

    #[test]
    fn test_url_encodes_password() {
        let config = RedisBackendConfig::builder().password("p@ss:word/").db(3).build().unwrap();
        assert_eq!(config.url(), "redis://:p%40ss%3Aword%2F@localhost:6379/3");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RedisBackendConfig::builder().password("hunter2").build().unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"), "password leaked into {debug}");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_serialization_omits_password() {
        let config = RedisBackendConfig::builder().password("hunter2").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_from_lookup_empty_environment_uses_defaults() {
        let config = RedisBackendConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = RedisBackendConfig::from_lookup(lookup_from(&[
            (ENV_HOST, "redis.internal"),
            (ENV_PORT, "6380"),
            (ENV_DB, "2"),
            (ENV_PASSWORD, "secret"),
            (ENV_KEY_PREFIX, "notes:"),
        ]))
        .unwrap();

        assert_eq!(config.host(), "redis.internal");
        assert_eq!(config.port(), 6380);
        assert_eq!(config.db(), 2);
        assert!(config.has_password());
        assert_eq!(config.key_prefix(), "notes:");
    }

    #[test]
    fn test_from_lookup_empty_password_is_none() {
        let config = RedisBackendConfig::from_lookup(lookup_from(&[(ENV_PASSWORD, "")])).unwrap();
        assert!(!config.has_password());
    }

    #[test]
    fn test_from_lookup_rejects_unparseable_port() {
        let result = RedisBackendConfig::from_lookup(lookup_from(&[(ENV_PORT, "sixty")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: ENV_PORT, .. })));
    }

    #[test]
    fn test_with_key_prefix_keeps_connection_settings() {
        let config = RedisBackendConfig::builder()
            .host("h")
            .password("pw")
            .build()
            .unwrap()
            .with_key_prefix("scoped:");

        assert_eq!(config.key_prefix(), "scoped:");
        assert_eq!(config.url(), "redis://:pw@h:6379/0");
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let config: RedisBackendConfig = serde_json::from_str(r#"{"host": "h"}"#).unwrap();

        assert_eq!(config.host(), "h");
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.db(), DEFAULT_DB);
    }
}
