//! Configuration for the object-store note backend.

use note_api_storage::ConfigError;
use object_store::path::Path;
use serde::{Deserialize, Serialize};

/// Default object name prefix.
pub const DEFAULT_PREFIX: &str = "notes";

/// Environment variable holding the bucket name.
pub const ENV_BUCKET: &str = "GCS_BUCKET";
/// Environment variable holding the object name prefix.
pub const ENV_PREFIX: &str = "GCS_PREFIX";
/// Environment variable holding the service account key file path.
pub const ENV_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Configuration for [`ObjectStoreBackend`](crate::ObjectStoreBackend) on
/// Google Cloud Storage.
///
/// Notes are stored as `gs://{bucket}/{prefix}/{encoded id}`.
///
/// # Example
///
/// ```
/// use note_api_storage_gcs::GcsBackendConfig;
///
/// let config = GcsBackendConfig::builder().bucket("my-notes").build()?;
/// assert_eq!(config.prefix(), "notes");
/// # Ok::<(), note_api_storage::ConfigError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GcsBackendConfig {
    /// Bucket holding the notes.
    pub(crate) bucket: String,

    /// Object name prefix, without leading or trailing `/`.
    #[serde(default = "default_prefix")]
    pub(crate) prefix: String,

    /// Path to a service account key file. When absent, credentials come
    /// from the ambient environment.
    #[serde(default)]
    pub(crate) service_account_path: Option<String>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_owned()
}

#[bon::bon]
impl GcsBackendConfig {
    /// Creates a new configuration, validating every field.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket name. Required.
    ///
    /// # Optional Fields
    ///
    /// * `prefix` - Object name prefix (default: `notes`).
    /// * `service_account_path` - Service account key file (default: ambient credentials).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `bucket` is empty
    /// - `prefix` is empty, starts or ends with `/`, or has an empty or dot segment
    #[builder]
    pub fn new(
        #[builder(into)] bucket: String,
        #[builder(into, default = DEFAULT_PREFIX.to_owned())] prefix: String,
        #[builder(into)] service_account_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        if bucket.is_empty() {
            return Err(ConfigError::invalid(ENV_BUCKET, "bucket name cannot be empty"));
        }

        validate_prefix(&prefix)?;

        Ok(Self { bucket, prefix, service_account_path })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads `GCS_BUCKET`, `GCS_PREFIX` and `GOOGLE_APPLICATION_CREDENTIALS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `GCS_BUCKET` is unset, or
    /// [`ConfigError::InvalidValue`] if a value fails validation.
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
        let bucket = lookup(ENV_BUCKET)
            .filter(|b| !b.is_empty())
            .ok_or(ConfigError::MissingField { field: ENV_BUCKET })?;

        Self::builder()
            .bucket(bucket)
            .prefix(lookup(ENV_PREFIX).unwrap_or_else(default_prefix))
            .maybe_service_account_path(lookup(ENV_CREDENTIALS).filter(|p| !p.is_empty()))
            .build()
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the object name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the service account key file path, if configured.
    #[must_use]
    pub fn service_account_path(&self) -> Option<&str> {
        self.service_account_path.as_deref()
    }

    /// Returns the prefix as an object store path.
    pub(crate) fn prefix_path(&self) -> Result<Path, ConfigError> {
        Path::parse(&self.prefix).map_err(|e| ConfigError::invalid(ENV_PREFIX, e.to_string()))
    }
}

fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::invalid(ENV_PREFIX, "prefix cannot be empty"));
    }
    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(ConfigError::invalid(ENV_PREFIX, "prefix cannot start or end with '/'"));
    }
    if prefix.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(ConfigError::invalid(ENV_PREFIX, "prefix has an empty or dot segment"));
    }
    Path::parse(prefix).map_err(|e| ConfigError::invalid(ENV_PREFIX, e.to_string()))?;
    Ok(())
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
    fn test_valid_config() {
        let config = GcsBackendConfig::builder().bucket("b").build().unwrap();

        assert_eq!(config.bucket(), "b");
        assert_eq!(config.prefix(), DEFAULT_PREFIX);
        assert!(config.service_account_path().is_none());
        assert_eq!(config.prefix_path().unwrap().as_ref(), "notes");
    }

    #[test]
    fn test_nested_prefix() {
        let config = GcsBackendConfig::builder().bucket("b").prefix("team/notes").build().unwrap();
        assert_eq!(config.prefix_path().unwrap().parts().count(), 2);
    }

    #[test]
    fn test_validation_empty_bucket() {
        let result = GcsBackendConfig::builder().bucket("").build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: ENV_BUCKET, .. })));
    }

    #[test]
    fn test_validation_bad_prefixes() {
        for prefix in ["", "/notes", "notes/", "a//b", "a/../b", "."] {
            let result = GcsBackendConfig::builder().bucket("b").prefix(prefix).build();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { field: ENV_PREFIX, .. })),
                "prefix {prefix:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_lookup_missing_bucket() {
        let result = GcsBackendConfig::from_lookup(lookup_from(&[(ENV_PREFIX, "x")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingField { field: ENV_BUCKET });
    }

    #[test]
    fn test_from_lookup_empty_bucket_is_missing() {
        let result = GcsBackendConfig::from_lookup(lookup_from(&[(ENV_BUCKET, "")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingField { field: ENV_BUCKET });
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = GcsBackendConfig::from_lookup(lookup_from(&[
            (ENV_BUCKET, "notes-bucket"),
            (ENV_PREFIX, "prod/notes"),
            (ENV_CREDENTIALS, "/secrets/sa.json"),
        ]))
        .unwrap();

        assert_eq!(config.bucket(), "notes-bucket");
        assert_eq!(config.prefix(), "prod/notes");
        assert_eq!(config.service_account_path(), Some("/secrets/sa.json"));
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let config: GcsBackendConfig = serde_json::from_str(r#"{"bucket": "b"}"#).unwrap();

        assert_eq!(config.prefix(), DEFAULT_PREFIX);
        assert!(config.service_account_path().is_none());
    }
}
