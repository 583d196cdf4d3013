// # dns01-core
//
// Core library for DNS-01 challenge solvers.
//
// ## Architecture Overview
//
// This library provides the provider-independent pieces of an ACME DNS-01
// solver:
// - **ChallengeRequest**: The challenge handed over by the host, plus node
//   name derivation
// - **ChallengeSolver**: Trait for presenting and cleaning up TXT records
// - **SecretStore**: Trait for resolving credential references
// - **Pacer**: Trait for request pacing in provider clients
// - **SolverRegistry**: Plugin-based registry for solvers
//
// ## Design Principles
//
// 1. **Stateless between calls**: Present and CleanUp re-resolve everything
//    from the challenge; no record IDs are carried between them
// 2. **Idempotency**: Both operations are safe to repeat
// 3. **Plugin-Based**: Solvers are registered dynamically, no hard-coded if-else
// 4. **Secrets stay opaque**: Credentials never appear in logs or Debug output

pub mod challenge;
pub mod config;
pub mod credentials;
pub mod error;
pub mod pacing;
pub mod registry;
pub mod secrets;
pub mod traits;

// Re-export core types for convenience
pub use challenge::{CHALLENGE_RECORD_TYPE, ChallengeRequest};
pub use config::{Dns01Config, ProviderConfig, SecretKeySelector, SecretStoreConfig, SolverConfig};
pub use credentials::{ApiKey, resolve_api_key};
pub use error::{Error, Result};
pub use pacing::{FixedDelayPacer, MinIntervalPacer, NoPacing};
pub use registry::SolverRegistry;
pub use secrets::{DirectorySecretStore, MemorySecretStore};
pub use traits::{ChallengeSolver, Pacer, SecretStore, SolverFactory};
