// # Directory Secret Store
//
// File-based implementation of SecretStore.
//
// ## Purpose
//
// Reads credentials from secrets mounted as files, the layout produced by
// projecting secret volumes into a container:
//
// ```text
// <root>/
//   <namespace>/
//     <secret-name>/
//       <key>        # raw value, trailing whitespace ignored by callers
// ```
//
// An empty namespace maps to `<root>/<secret-name>/<key>`.
//
// ## Security
//
// - Path components are validated; `..` and separators are rejected
// - File contents are never logged

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Error;
use crate::traits::secret_store::SecretStore;

/// Secret store backed by a directory tree
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::secrets::DirectorySecretStore;
/// use dns01_core::traits::SecretStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = DirectorySecretStore::new("/var/run/secrets/dns01");
///
///     let value = store.get("cert-manager", "dynu-secret", "api-key").await?;
///     assert!(value.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySecretStore {
    root: PathBuf,
}

impl DirectorySecretStore {
    /// Create a store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one secret's keys
    fn secret_dir(&self, namespace: &str, name: &str) -> Result<PathBuf, Error> {
        validate_component("secret name", name)?;

        let mut dir = self.root.clone();
        if !namespace.is_empty() {
            validate_component("namespace", namespace)?;
            dir.push(namespace);
        }
        dir.push(name);
        Ok(dir)
    }
}

/// Reject anything that could escape the store root
fn validate_component(what: &str, value: &str) -> Result<(), Error> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(Error::credentials(format!("Invalid {}: '{}'", what, value)));
    }
    Ok(())
}

#[async_trait]
impl SecretStore for DirectorySecretStore {
    async fn get(&self, namespace: &str, name: &str, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let dir = self.secret_dir(namespace, name)?;
        validate_component("secret key", key)?;

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Err(Error::credentials(format!(
                "failed to load secret \"{}/{}\"",
                namespace, name
            )));
        }

        let path = dir.join(key);
        match fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(namespace, name, key, "Loaded secret key from directory store");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::credentials(format!(
                "Failed to read secret file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
