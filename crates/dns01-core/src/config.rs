//! Configuration types for the DNS-01 solver system
//!
//! Two layers of configuration exist:
//!
//! - [`Dns01Config`]: host-level settings (which provider, where secrets live),
//!   read once at startup.
//! - [`SolverConfig`]: per-issuer settings decoded from the opaque JSON blob
//!   carried by every [`ChallengeRequest`](crate::ChallengeRequest).

use serde::{Deserialize, Serialize};

/// Dynu API base URL (including version)
pub const DEFAULT_DYNU_BASE_URL: &str = "https://api.dynu.com/v2";

/// Default User-Agent sent to the provider
pub const DEFAULT_USER_AGENT: &str = concat!("dns01/", env!("CARGO_PKG_VERSION"));

/// Main host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dns01Config {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// Secret store configuration
    #[serde(default)]
    pub secret_store: SecretStoreConfig,
}

impl Dns01Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.secret_store.validate()?;
        Ok(())
    }
}

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Dynu provider
    Dynu {
        /// API base URL including the version segment
        #[serde(default = "default_base_url")]
        base_url: String,
        /// User-Agent header value
        #[serde(default = "default_user_agent")]
        user_agent: String,
        /// Delay applied before every API request (in seconds)
        #[serde(default = "default_rate_limit_secs")]
        rate_limit_secs: u64,
        /// Per-request timeout (in seconds)
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Dynu provider with default endpoint and pacing
    pub fn dynu() -> Self {
        ProviderConfig::Dynu {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            rate_limit_secs: default_rate_limit_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Dynu {
                base_url,
                timeout_secs,
                ..
            } => {
                if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
                    return Err(crate::Error::config(format!(
                        "Dynu base URL must use HTTP or HTTPS scheme. Got: {}",
                        base_url
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("Dynu request timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Dynu { .. } => "dynu",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::dynu()
    }
}

/// Secret store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecretStoreConfig {
    /// Secrets mounted as files: `<path>/<namespace>/<name>/<key>`
    Directory {
        /// Root directory
        path: String,
    },

    /// In-memory secrets (empty unless populated by the embedder)
    #[default]
    Memory,
}

impl SecretStoreConfig {
    /// Validate the secret store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SecretStoreConfig::Directory { path } if path.is_empty() => Err(
                crate::Error::config("Secret directory path cannot be empty"),
            ),
            _ => Ok(()),
        }
    }
}

/// Reference to one key of a named secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    /// Secret name
    #[serde(default)]
    pub name: String,
    /// Key within the secret
    #[serde(default)]
    pub key: String,
}

impl SecretKeySelector {
    /// Create a new selector
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Whether the selector names a secret at all
    pub fn is_set(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Per-issuer solver configuration
///
/// Decoded from the JSON blob attached to each challenge:
///
/// ```json
/// {
///   "apiKey": "...",
///   "ttl": 120,
///   "apikeySecretKeyRef": { "name": "dynu-secret", "key": "api-key" }
/// }
/// ```
///
/// The Debug implementation does NOT expose the inline API key.
#[derive(Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Inline API key (takes precedence over the secret reference)
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// TTL for challenge records (in seconds)
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Secret holding the API key
    #[serde(
        rename = "apikeySecretKeyRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key_secret_ref: Option<SecretKeySelector>,
}

impl std::fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("ttl", &self.ttl)
            .field("api_key_secret_ref", &self.api_key_secret_ref)
            .finish()
    }
}

impl SolverConfig {
    /// Decode the configuration blob of a challenge
    ///
    /// A missing (or JSON `null`) blob yields the defaults.
    pub fn from_json(raw: Option<&serde_json::Value>) -> Result<Self, crate::Error> {
        match raw {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                crate::Error::config(format!("error decoding solver config: {}", e))
            }),
        }
    }

    /// Validate the solver configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        let has_inline = self.api_key.as_deref().is_some_and(|k| !k.is_empty());
        let has_ref = self
            .api_key_secret_ref
            .as_ref()
            .is_some_and(SecretKeySelector::is_set);

        if !has_inline && !has_ref {
            return Err(crate::Error::config(
                "Either apiKey or apikeySecretKeyRef must be provided",
            ));
        }
        if self.ttl == 0 {
            return Err(crate::Error::config("ttl must be > 0"));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            ttl: default_ttl(),
            api_key_secret_ref: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_DYNU_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_rate_limit_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ttl() -> u32 {
    300
}
