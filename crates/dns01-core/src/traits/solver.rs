// # Challenge Solver Trait
//
// Defines the interface the host uses to publish and remove DNS-01
// challenge records at a DNS provider.
//
// ## Implementations
//
// - Dynu: `dns01-provider-dynu` crate
//
// ## Usage
//
// ```rust,ignore
// use dns01_core::{ChallengeRequest, ChallengeSolver};
//
// #[tokio::main]
// async fn main() -> Result<(), dns01_core::Error> {
//     let solver = /* ChallengeSolver implementation */;
//     let ch = ChallengeRequest::new("_acme-challenge.example.com.", "example.com.", "token");
//
//     solver.present(&ch).await?;
//     // ... ACME server validates ...
//     solver.clean_up(&ch).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::challenge::ChallengeRequest;

/// Trait for DNS-01 challenge solvers
///
/// # Idempotency
///
/// The host may call `present` and `clean_up` any number of times with the
/// same request. Implementations must converge on "exactly one matching
/// record" and "no matching record" respectively, without duplicating
/// records or failing because the record is already gone.
///
/// # Statelessness
///
/// Implementations must not carry record identifiers from `present` to
/// `clean_up`. Each call re-resolves the target record from the request
/// (zone, node name, key), so concurrent challenges in the same zone
/// cannot interfere with each other.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ChallengeSolver: Send + Sync {
    /// Solver name used by the host to select an implementation
    ///
    /// # Returns
    ///
    /// A static string identifying the solver (e.g., "dynu")
    fn name(&self) -> &'static str;

    /// Ensure the challenge TXT record exists
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The record exists (created now or earlier)
    /// - `Err(Error)`: If the record could not be ensured
    async fn present(&self, challenge: &ChallengeRequest) -> Result<(), crate::Error>;

    /// Ensure the challenge TXT record is removed
    ///
    /// Only the record whose value equals `challenge.key` is removed; other
    /// TXT records under the same name are left alone.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The record is gone (deleted now or already absent)
    /// - `Err(Error)`: If the removal failed
    async fn clean_up(&self, challenge: &ChallengeRequest) -> Result<(), crate::Error>;
}

/// Helper trait for constructing solvers from configuration
pub trait SolverFactory: Send + Sync {
    /// Create a ChallengeSolver instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Provider configuration for this solver
    /// - `secrets`: Secret store used to resolve credential references
    ///
    /// # Returns
    ///
    /// A boxed ChallengeSolver trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
        secrets: std::sync::Arc<dyn crate::traits::SecretStore>,
    ) -> Result<Box<dyn ChallengeSolver>, crate::Error>;
}
