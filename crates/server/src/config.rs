//! Process configuration: which backend to build and where to listen.
//!
//! Everything is read from environment variables once at startup. A `.env`
//! file, if present, is loaded into the environment by `main` first.

use std::{fmt, str::FromStr};

use note_api_storage::ConfigError;
use note_api_storage_gcs::GcsBackendConfig;
use note_api_storage_redis::RedisBackendConfig;
use tracing::warn;

/// Environment variable selecting the storage backend.
pub const ENV_BACKEND: &str = "BACKEND";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the listen address.
pub const ENV_HOST: &str = "HOST";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// The storage backend variants a process can run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Process-local map.
    #[default]
    Memory,
    /// Redis server.
    Redis,
    /// Google Cloud Storage bucket.
    Gcs,
}

impl BackendKind {
    /// Returns the `BACKEND` value naming this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
            Self::Gcs => "gcs",
        }
    }

    /// Interprets a raw `BACKEND` value.
    ///
    /// An absent value selects [`BackendKind::Memory`]. So does an
    /// unrecognized one, with a warning, so a typo never stops the process.
    #[must_use]
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None => Self::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "unrecognized BACKEND value, falling back to memory");
                Self::Memory
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    /// Exact parse: the value must be one of `memory`, `redis` or `gcs`,
    /// with no surrounding whitespace and in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            "gcs" => Ok(Self::Gcs),
            _ => Err(ConfigError::invalid(
                ENV_BACKEND,
                format!("{s:?} is not one of memory, redis, gcs"),
            )),
        }
    }
}

/// The selected backend together with its own configuration.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// In-memory backend; needs no settings.
    Memory,
    /// Redis backend settings.
    Redis(RedisBackendConfig),
    /// Google Cloud Storage backend settings.
    Gcs(GcsBackendConfig),
}

impl BackendConfig {
    /// Loads the backend selection and its settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected backend's settings are
    /// missing or invalid. An unusable `BACKEND` value is not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Only the selected backend's variables are read.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = BackendKind::from_setting(lookup(ENV_BACKEND).as_deref());
        Ok(match kind {
            BackendKind::Memory => Self::Memory,
            BackendKind::Redis => Self::Redis(RedisBackendConfig::from_lookup(lookup)?),
            BackendKind::Gcs => Self::Gcs(GcsBackendConfig::from_lookup(lookup)?),
        })
    }

    /// Returns the kind of backend this configuration builds.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Memory => BackendKind::Memory,
            Self::Redis(_) => BackendKind::Redis,
            Self::Gcs(_) => BackendKind::Gcs,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

#[bon::bon]
impl ServerConfig {
    /// Creates a listener configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `host` is empty.
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_HOST.to_owned())] host: String,
        #[builder(default = DEFAULT_PORT)] port: u16,
    ) -> Result<Self, ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::invalid(ENV_HOST, "host cannot be empty"));
        }
        Ok(Self { host, port })
    }

    /// Loads `HOST` and `PORT` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
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

        Self::builder()
            .host(lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_owned()))
            .port(port)
            .build()
    }

    /// Returns the listen address as `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the listen port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}
