// # Dynu DNS Provider
//
// This crate provides a Dynu DNS-01 challenge solver.
//
// ## Behaviour
//
// - Present: resolve domain ID -> search record list -> create only if no
//   record with the same node name and text exists
// - CleanUp: resolve domain ID -> search record list -> delete the match,
//   or succeed if there is none
// - Every request is preceded by the configured pacing delay (5 seconds by
//   default) because the API rejects bursts
// - HTTP timeout configured (30 seconds)
// - No retry logic: a failed call is reported to the host, which decides
//   whether to call again
// - No record IDs are kept between Present and CleanUp
//
// ## Security Requirements
//
// - API key NEVER appears in logs, Debug output or error messages
// - API key comes from the issuer config or a referenced secret
//
// ## API Reference
//
// - Dynu API v2: https://www.dynu.com/en-US/Support/API
// - Get root domain: GET `/dns/getroot/:hostname`
// - List DNS records: GET `/dns/:domain_id/record`
// - Add DNS record: POST `/dns/:domain_id/record`
// - Delete DNS record: DELETE `/dns/:domain_id/record/:record_id`

pub mod client;
pub mod models;

pub use client::{DynuClient, DynuSettings, EnsureResult, RemoveResult};
pub use models::{DnsRecord, DnsRecordRequest, Domain};

use async_trait::async_trait;
use dns01_core::config::ProviderConfig;
use dns01_core::traits::{ChallengeSolver, SecretStore, SolverFactory};
use dns01_core::{ChallengeRequest, Error, Result, SolverConfig, resolve_api_key};
use std::sync::Arc;

/// Name the solver is registered under
pub const SOLVER_NAME: &str = "dynu";

/// Dynu challenge solver
///
/// Holds only connection settings, a shared HTTP connection pool and the
/// secret store. Everything challenge-specific (credentials, zone, node
/// name, TTL) is derived from the request on each call.
pub struct DynuSolver {
    settings: DynuSettings,
    http: reqwest::Client,
    secrets: Arc<dyn SecretStore>,
}

impl std::fmt::Debug for DynuSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynuSolver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DynuSolver {
    /// Create a new Dynu solver
    ///
    /// # Parameters
    ///
    /// - `settings`: Endpoint, timeout and pacing
    /// - `secrets`: Store used to resolve `apikeySecretKeyRef`
    pub fn new(settings: DynuSettings, secrets: Arc<dyn SecretStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            settings,
            http,
            secrets,
        })
    }

    /// Build a zone-bound client for one challenge
    async fn client_for(&self, challenge: &ChallengeRequest) -> Result<(DynuClient, SolverConfig)> {
        let config = SolverConfig::from_json(challenge.config.as_ref())?;
        config.validate()?;

        let api_key = resolve_api_key(
            &config,
            &challenge.resource_namespace,
            self.secrets.as_ref(),
        )
        .await?;

        let client = DynuClient::with_http_client(
            self.http.clone(),
            challenge.zone_hostname(),
            api_key,
            self.settings.clone(),
        );
        Ok((client, config))
    }
}

#[async_trait]
impl ChallengeSolver for DynuSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn present(&self, challenge: &ChallengeRequest) -> Result<()> {
        let node_name = challenge.node_name()?;
        tracing::info!(
            fqdn = %challenge.resolved_fqdn,
            zone = %challenge.resolved_zone,
            node = %node_name,
            "Presenting DNS-01 challenge record"
        );

        let (client, config) = self.client_for(challenge).await?;
        let record = DnsRecordRequest::txt(node_name, challenge.key.as_str(), config.ttl);

        match client.create_dns_record(&record).await {
            Ok(result) => {
                tracing::debug!(?result, "Challenge record present");
                Ok(())
            }
            Err(e) => {
                tracing::error!(stage = e.stage(), error = %e, "Failed to create DNS record");
                Err(e)
            }
        }
    }

    async fn clean_up(&self, challenge: &ChallengeRequest) -> Result<()> {
        let node_name = challenge.node_name()?;
        tracing::info!(
            fqdn = %challenge.resolved_fqdn,
            zone = %challenge.resolved_zone,
            node = %node_name,
            "Cleaning up DNS-01 challenge record"
        );

        let (client, _) = self.client_for(challenge).await?;

        match client.remove_dns_record(&node_name, &challenge.key).await {
            Ok(result) => {
                tracing::debug!(?result, "Challenge record cleaned up");
                Ok(())
            }
            Err(e) => {
                tracing::error!(stage = e.stage(), error = %e, "Failed to remove DNS record");
                Err(e)
            }
        }
    }
}

/// Factory for creating Dynu solvers
pub struct DynuFactory;

impl SolverFactory for DynuFactory {
    fn create(
        &self,
        config: &ProviderConfig,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Box<dyn ChallengeSolver>> {
        let settings = DynuSettings::from_config(config)?;
        Ok(Box::new(DynuSolver::new(settings, secrets)?))
    }
}

/// Register the Dynu solver with a registry
///
/// This function should be called during initialization to make the
/// Dynu solver available.
///
/// # Example
///
/// ```rust
/// use dns01_core::SolverRegistry;
///
/// let registry = SolverRegistry::new();
/// dns01_provider_dynu::register(&registry);
/// assert!(registry.has_solver("dynu"));
/// ```
pub fn register(registry: &dns01_core::SolverRegistry) {
    registry.register_solver(SOLVER_NAME, Box::new(DynuFactory));
}
