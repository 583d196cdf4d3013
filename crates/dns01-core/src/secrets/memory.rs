// # Memory Secret Store
//
// In-memory implementation of SecretStore.
//
// ## Purpose
//
// Provides secrets held by the embedding application, with no filesystem
// access. Useful for testing and for hosts that fetch secrets themselves
// before handing them to the solver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::secret_store::SecretStore;

/// Secret data keyed by (namespace, name)
type SecretMap = HashMap<(String, String), HashMap<String, Vec<u8>>>;

/// In-memory secret store implementation
///
/// This implementation stores all secrets in a HashMap protected by a RwLock.
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::secrets::MemorySecretStore;
/// use dns01_core::traits::SecretStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemorySecretStore::new();
///     store.insert("cert-manager", "dynu-secret", "api-key", "abc123").await;
///
///     let value = store.get("cert-manager", "dynu-secret", "api-key").await?;
///     assert_eq!(value.as_deref(), Some(&b"abc123"[..]));
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    inner: Arc<RwLock<SecretMap>>,
}

// Only secret coordinates are shown, never values
impl std::fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySecretStore").finish_non_exhaustive()
    }
}

impl MemorySecretStore {
    /// Create a new empty memory secret store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one key of a secret
    pub async fn insert(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) {
        let mut guard = self.inner.write().await;
        guard
            .entry((namespace.into(), name.into()))
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Remove a whole secret
    pub async fn remove(&self, namespace: &str, name: &str) {
        let mut guard = self.inner.write().await;
        guard.remove(&(namespace.to_string(), name.to_string()));
    }

    /// Get the number of secrets in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, namespace: &str, name: &str, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let guard = self.inner.read().await;
        let secret = guard
            .get(&(namespace.to_string(), name.to_string()))
            .ok_or_else(|| {
                Error::credentials(format!("failed to load secret \"{}/{}\"", namespace, name))
            })?;

        Ok(secret.get(key).cloned())
    }
}
