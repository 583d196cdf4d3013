// # Secret Store Implementations
//
// This module provides implementations of the SecretStore trait for
// different credential sources.

pub mod directory;
pub mod memory;

pub use directory::DirectorySecretStore;
pub use memory::MemorySecretStore;

use std::sync::Arc;

use crate::config::SecretStoreConfig;
use crate::traits::SecretStore;

/// Build the secret store described by `config`
pub fn from_config(config: &SecretStoreConfig) -> crate::Result<Arc<dyn SecretStore>> {
    config.validate()?;
    Ok(match config {
        SecretStoreConfig::Directory { path } => Arc::new(DirectorySecretStore::new(path)),
        SecretStoreConfig::Memory => Arc::new(MemorySecretStore::new()),
    })
}
