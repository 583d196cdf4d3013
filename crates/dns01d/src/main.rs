// # dns01d - DNS-01 Challenge Host
//
// This binary is a THIN integration layer: it reads one challenge from the
// environment, hands it to the registered solver and exits. All DNS logic
// lives in dns01-core and the provider crates.
//
// dns01d is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Registering solvers and building the secret store
// 4. Running exactly one Present or CleanUp
//
// ## Configuration
//
// ### Challenge
// - `DNS01_ACTION`: `present` or `cleanup`
// - `DNS01_FQDN`: Fully-qualified challenge name (e.g. `_acme-challenge.example.com.`)
// - `DNS01_ZONE`: Zone the record lives in (e.g. `example.com.`)
// - `DNS01_KEY`: TXT record value
// - `DNS01_NAMESPACE`: Namespace used to resolve secret references (optional)
// - `DNS01_CONFIG`: Solver config JSON, e.g. `{"apiKey": "...", "ttl": 120}` (optional)
//
// ### Provider
// - `DNS01_SOLVER`: Solver name (dynu)
// - `DNS01_BASE_URL`: API base URL (optional)
// - `DNS01_USER_AGENT`: User-Agent header (optional)
// - `DNS01_RATE_LIMIT_SECS`: Delay before every API request (default 5)
// - `DNS01_TIMEOUT_SECS`: Per-request timeout (default 30)
//
// ### Secrets
// - `DNS01_SECRETS_DIR`: Root of `<namespace>/<name>/<key>` secret files (optional)
//
// ### Logging
// - `DNS01_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export DNS01_ACTION=present
// export DNS01_FQDN=_acme-challenge.example.com.
// export DNS01_ZONE=example.com.
// export DNS01_KEY=LoqXcYV8q5ONbJQxbmR7SCTNo3h6Nqo4X0q6W8g2bUk
// export DNS01_NAMESPACE=cert-manager
// export DNS01_CONFIG='{"apikeySecretKeyRef": {"name": "dynu-secret", "key": "api-key"}}'
// export DNS01_SECRETS_DIR=/run/secrets
//
// dns01d
// ```

use anyhow::{Context, Result};
use dns01_core::config::{DEFAULT_DYNU_BASE_URL, DEFAULT_USER_AGENT};
use dns01_core::{ChallengeRequest, Dns01Config, ProviderConfig, SecretStoreConfig};
use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Challenge operation succeeded
/// - 1: Configuration or startup error
/// - 2: The solver reported a failure
#[derive(Debug, Clone, Copy)]
enum Dns01ExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<Dns01ExitCode> for ExitCode {
    fn from(code: Dns01ExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Operation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Present,
    CleanUp,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "present" => Ok(Action::Present),
            "cleanup" | "clean_up" | "clean-up" => Ok(Action::CleanUp),
            other => anyhow::bail!(
                "DNS01_ACTION '{}' is not valid. Valid actions: present, cleanup",
                other
            ),
        }
    }
}

/// Application configuration
///
/// Not `Debug`: the solver config may carry an inline API key.
struct Config {
    action: Action,
    fqdn: String,
    zone: String,
    key: String,
    namespace: String,
    solver_config: Option<serde_json::Value>,
    solver: String,
    base_url: String,
    user_agent: String,
    rate_limit_secs: u64,
    timeout_secs: u64,
    secrets_dir: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, treating empty values as unset
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| var(name).with_context(|| format!("{} is required", name));

        let solver_config = var("DNS01_CONFIG")
            .map(|raw| serde_json::from_str::<serde_json::Value>(&raw))
            .transpose()
            .context("DNS01_CONFIG is not valid JSON")?;

        let rate_limit_secs = var("DNS01_RATE_LIMIT_SECS")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("DNS01_RATE_LIMIT_SECS must be a whole number of seconds")?
            .unwrap_or(5);

        let timeout_secs = var("DNS01_TIMEOUT_SECS")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("DNS01_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(30);

        Ok(Self {
            action: required("DNS01_ACTION")?.parse()?,
            fqdn: required("DNS01_FQDN")?,
            zone: required("DNS01_ZONE")?,
            key: required("DNS01_KEY")?,
            namespace: var("DNS01_NAMESPACE").unwrap_or_default(),
            solver_config,
            solver: var("DNS01_SOLVER").unwrap_or_else(|| "dynu".to_string()),
            base_url: var("DNS01_BASE_URL").unwrap_or_else(|| DEFAULT_DYNU_BASE_URL.to_string()),
            user_agent: var("DNS01_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            rate_limit_secs,
            timeout_secs,
            secrets_dir: var("DNS01_SECRETS_DIR"),
            log_level: var("DNS01_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.solver.as_str() {
            "dynu" => {}
            _ => anyhow::bail!(
                "DNS01_SOLVER '{}' is not supported. Supported solvers: dynu",
                self.solver
            ),
        }

        if self.rate_limit_secs > 300 {
            anyhow::bail!(
                "DNS01_RATE_LIMIT_SECS must be between 0 and 300 seconds. Got: {}",
                self.rate_limit_secs
            );
        }

        if !(1..=300).contains(&self.timeout_secs) {
            anyhow::bail!(
                "DNS01_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                self.timeout_secs
            );
        }

        if let Some(ref dir) = self.secrets_dir
            && !std::path::Path::new(dir).is_dir()
        {
            anyhow::bail!("DNS01_SECRETS_DIR is not a directory: {}", dir);
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DNS01_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.host_config().validate()?;
        self.challenge().node_name()?;

        Ok(())
    }

    /// Host-level configuration for the registry and secret store
    fn host_config(&self) -> Dns01Config {
        let provider = ProviderConfig::Dynu {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            rate_limit_secs: self.rate_limit_secs,
            timeout_secs: self.timeout_secs,
        };

        let secret_store = match self.secrets_dir {
            Some(ref path) => SecretStoreConfig::Directory { path: path.clone() },
            None => SecretStoreConfig::Memory,
        };

        Dns01Config {
            provider,
            secret_store,
        }
    }

    /// The challenge described by the environment
    fn challenge(&self) -> ChallengeRequest {
        let challenge = ChallengeRequest::new(&self.fqdn, &self.zone, &self.key)
            .with_namespace(&self.namespace);
        match self.solver_config {
            Some(ref config) => challenge.with_config(config.clone()),
            None => challenge,
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Dns01ExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    // Calls are sequential, a single thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return Dns01ExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config).await {
            Ok(()) => Dns01ExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                Dns01ExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run one challenge operation
async fn run(config: Config) -> Result<()> {
    let registry = dns01_core::SolverRegistry::new();

    #[cfg(feature = "dynu")]
    {
        info!("Registering Dynu solver");
        dns01_provider_dynu::register(&registry);
    }

    let host = config.host_config();
    let secrets = dns01_core::secrets::from_config(&host.secret_store)?;
    let solver = registry.create_solver(&host.provider, secrets)?;

    let challenge = config.challenge();
    info!(
        solver = solver.name(),
        action = ?config.action,
        fqdn = %challenge.resolved_fqdn,
        zone = %challenge.resolved_zone,
        "Running DNS-01 challenge operation"
    );

    match config.action {
        Action::Present => solver.present(&challenge).await?,
        Action::CleanUp => solver.clean_up(&challenge).await?,
    }

    info!(action = ?config.action, "Challenge operation finished");
    Ok(())
}
