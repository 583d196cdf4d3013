//! Provider credentials
//!
//! [`ApiKey`] wraps the provider secret so it cannot leak through `Debug`
//! or `Display`. [`resolve_api_key`] turns a [`SolverConfig`] into a key,
//! preferring the inline value and falling back to the referenced secret.

use crate::config::SolverConfig;
use crate::traits::SecretStore;
use crate::{Error, Result};

/// Provider API key
///
/// Formatting never reveals the value; use [`ApiKey::expose`] where the
/// raw key is needed (request headers).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting empty values
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::credentials("API key cannot be empty"));
        }
        Ok(Self(key))
    }

    /// Raw key value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<REDACTED>)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<REDACTED>")
    }
}

/// Resolve the API key for a challenge
///
/// - Inline `apiKey` wins when non-empty.
/// - Otherwise `apikeySecretKeyRef` is read from `namespace` and trimmed.
pub async fn resolve_api_key(
    config: &SolverConfig,
    namespace: &str,
    secrets: &dyn SecretStore,
) -> Result<ApiKey> {
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        return ApiKey::new(key);
    }

    let selector = config
        .api_key_secret_ref
        .as_ref()
        .filter(|s| s.is_set())
        .ok_or_else(|| Error::credentials("No apiKey or apikeySecretKeyRef configured"))?;

    let raw = secrets
        .get(namespace, &selector.name, &selector.key)
        .await?
        .ok_or_else(|| {
            Error::credentials(format!(
                "no key \"{}\" in secret \"{}/{}\"",
                selector.key, namespace, selector.name
            ))
        })?;

    let value = String::from_utf8(raw).map_err(|_| {
        Error::credentials(format!(
            "key \"{}\" in secret \"{}/{}\" is not valid UTF-8",
            selector.key, namespace, selector.name
        ))
    })?;

    tracing::debug!(
        namespace,
        secret = %selector.name,
        key = %selector.key,
        "Resolved API key from secret"
    );
    ApiKey::new(value.trim())
}
