//! Core traits for the DNS-01 solver system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ChallengeSolver`]: Present and clean up challenge records
//! - [`SecretStore`]: Resolve credential references
//! - [`Pacer`]: Request pacing policy for provider clients

pub mod pacer;
pub mod secret_store;
pub mod solver;

pub use pacer::Pacer;
pub use secret_store::SecretStore;
pub use solver::{ChallengeSolver, SolverFactory};
