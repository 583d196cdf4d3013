//! Plugin-based solver registry
//!
//! The registry allows challenge solvers to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains. The host selects a solver by
//! the name configured on the issuer (e.g. "dynu").
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dns01_core::registry::SolverRegistry;
//! use dns01_core::config::ProviderConfig;
//!
//! // Create a registry
//! let registry = SolverRegistry::new();
//!
//! // Register solvers
//! dns01_provider_dynu::register(&registry);
//!
//! // Create solver from config
//! let solver = registry.create_solver(&ProviderConfig::dynu(), secrets)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{ChallengeSolver, SecretStore, SolverFactory};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry for plugin-based solver creation
///
/// The registry maintains a map of solver names to factory objects,
/// allowing dynamic instantiation of solvers based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct SolverRegistry {
    /// Registered solver factories
    solvers: RwLock<HashMap<String, Box<dyn SolverFactory>>>,
}

impl SolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver factory
    ///
    /// # Parameters
    ///
    /// - `name`: Solver name (e.g., "dynu")
    /// - `factory`: Factory object for creating solver instances
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register_solver(&self, name: impl Into<String>, factory: Box<dyn SolverFactory>) {
        let name = name.into();
        let mut solvers = self.solvers.write().unwrap_or_else(PoisonError::into_inner);
        solvers.insert(name, factory);
    }

    /// Create a solver from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Provider configuration; its type name selects the factory
    /// - `secrets`: Secret store handed to the solver
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ChallengeSolver>)`: Created solver instance
    /// - `Err(Error)`: If the solver is not registered or creation fails
    pub fn create_solver(
        &self,
        config: &ProviderConfig,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Box<dyn ChallengeSolver>> {
        let solver_type = config.type_name();
        let solvers = self.solvers.read().unwrap_or_else(PoisonError::into_inner);

        let factory = solvers
            .get(solver_type)
            .ok_or_else(|| Error::config(format!("Unknown solver type: {}", solver_type)))?;

        factory.create(config, secrets)
    }

    /// List all registered solver names
    pub fn list_solvers(&self) -> Vec<String> {
        let solvers = self.solvers.read().unwrap_or_else(PoisonError::into_inner);
        solvers.keys().cloned().collect()
    }

    /// Check if a solver name is registered
    pub fn has_solver(&self, name: &str) -> bool {
        let solvers = self.solvers.read().unwrap_or_else(PoisonError::into_inner);
        solvers.contains_key(name)
    }
}
