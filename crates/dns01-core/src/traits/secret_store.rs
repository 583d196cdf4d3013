// # Secret Store Trait
//
// Defines the interface for looking up credentials referenced by solver
// configuration.
//
// ## Purpose
//
// Issuer configuration may reference the provider API key indirectly, as
// a key inside a named secret in the challenge's namespace, instead of
// embedding it. The secret store resolves such references.
//
// ## Implementations
//
// - Directory-based: mounted secret files (`secrets::DirectorySecretStore`)
// - In-memory: `secrets::MemorySecretStore`

use async_trait::async_trait;

/// Trait for secret store implementations
///
/// # Security
///
/// Implementations must never log secret values. Errors may name the
/// namespace, secret and key, but never the content.
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read one key of a named secret
    ///
    /// # Parameters
    ///
    /// - `namespace`: Namespace the secret lives in
    /// - `name`: Secret name
    /// - `key`: Key within the secret
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))`: The raw value
    /// - `Ok(None)`: The secret exists but has no such key
    /// - `Err(Error)`: The secret does not exist or could not be read
    async fn get(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, crate::Error>;
}
