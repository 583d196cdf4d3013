//! Dynu API client
//!
//! [`DynuClient`] reconciles challenge TXT records for one zone. Every
//! operation resolves the zone's domain ID and searches the record list
//! afresh; no IDs survive between calls.
//!
//! All requests go through [`DynuClient::send`], which waits on the
//! configured pacer, attaches the `API-Key` header and applies the request
//! timeout.

use dns01_core::config::{DEFAULT_DYNU_BASE_URL, DEFAULT_USER_AGENT, ProviderConfig};
use dns01_core::pacing::FixedDelayPacer;
use dns01_core::{ApiKey, Error, NoPacing, Pacer, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{DnsRecord, DnsRecordList, DnsRecordRequest, Domain};

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by every client a solver creates
#[derive(Debug, Clone)]
pub struct DynuSettings {
    /// API base URL including the version segment
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pacing policy applied before every request
    pub pacer: Arc<dyn Pacer>,
}

impl DynuSettings {
    /// Settings for `base_url` with default timeout, User-Agent and pacing
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            pacer: Arc::new(FixedDelayPacer::default()),
        }
    }

    /// Settings from a provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match config {
            ProviderConfig::Dynu {
                base_url,
                user_agent,
                rate_limit_secs,
                timeout_secs,
            } => {
                config.validate()?;
                Ok(Self::new(base_url.as_str())
                    .with_user_agent(user_agent.as_str())
                    .with_timeout(Duration::from_secs(*timeout_secs))
                    .with_pacer(Arc::new(FixedDelayPacer::new(Duration::from_secs(
                        *rate_limit_secs,
                    )))))
            }
            _ => Err(Error::config("Invalid config for Dynu provider")),
        }
    }

    /// Replace the User-Agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the pacing policy
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Disable pacing entirely
    pub fn without_pacing(self) -> Self {
        self.with_pacer(Arc::new(NoPacing))
    }
}

impl Default for DynuSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DYNU_BASE_URL)
    }
}

/// Outcome of [`DynuClient::create_dns_record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureResult {
    /// A new record was created
    Created {
        /// Provider-assigned record ID
        record_id: i64,
    },
    /// A matching record already existed; nothing was written
    Existing {
        /// Provider-assigned record ID
        record_id: i64,
    },
}

impl EnsureResult {
    /// Record ID regardless of outcome
    pub fn record_id(&self) -> i64 {
        match self {
            EnsureResult::Created { record_id } | EnsureResult::Existing { record_id } => *record_id,
        }
    }
}

/// Outcome of [`DynuClient::remove_dns_record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    /// The matching record was deleted
    Deleted {
        /// ID of the deleted record
        record_id: i64,
    },
    /// No matching record existed
    AlreadyAbsent,
}

/// Raw API response
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Status line, e.g. "404 Not Found"
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    /// Decode the body as JSON
    fn json<T: DeserializeOwned>(&self, what: &str) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::transport(format!("Failed to decode {} response: {}", what, e)))
    }
}

/// Dynu DNS client bound to one zone
///
/// # Security
///
/// The Debug implementation does NOT expose the API key.
pub struct DynuClient {
    http: reqwest::Client,
    settings: DynuSettings,
    hostname: String,
    api_key: ApiKey,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for DynuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynuClient")
            .field("api_key", &"<REDACTED>")
            .field("hostname", &self.hostname)
            .field("base_url", &self.settings.base_url)
            .field("pacer", &self.settings.pacer)
            .finish()
    }
}

impl DynuClient {
    /// Create a client with its own connection pool
    ///
    /// # Parameters
    ///
    /// - `hostname`: Zone hostname (e.g. "example.com")
    /// - `api_key`: Dynu API key
    /// - `settings`: Endpoint, timeout and pacing
    pub fn new(hostname: impl Into<String>, api_key: ApiKey, settings: DynuSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(http, hostname, api_key, settings))
    }

    /// Create a client that shares an existing connection pool
    pub fn with_http_client(
        http: reqwest::Client,
        hostname: impl Into<String>,
        api_key: ApiKey,
        settings: DynuSettings,
    ) -> Self {
        Self {
            http,
            settings,
            hostname: hostname.into(),
            api_key,
        }
    }

    /// Zone hostname this client operates on
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    fn records_url(&self, domain_id: i64) -> String {
        format!("{}/dns/{}/record", self.settings.base_url, domain_id)
    }

    /// Send one paced, authenticated request
    ///
    /// Non-2xx statuses are returned as responses, not errors; only
    /// network failures and timeouts fail here.
    pub async fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<ApiResponse> {
        self.settings.pacer.pace().await;

        tracing::debug!(%method, url, "Dynu API request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .timeout(self.settings.timeout)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("API-Key", self.api_key.expose());

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response from {}: {}", url, e)))?
            .to_vec();

        tracing::debug!(%method, url, %status, "Dynu API response");
        tracing::trace!(body = %String::from_utf8_lossy(&body), "Dynu API response body");

        Ok(ApiResponse { status, body })
    }

    /// Resolve the zone's domain ID
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /dns/getroot/example.com
    /// API-Key: <key>
    /// ```
    pub async fn get_domain_id(&self) -> Result<i64> {
        let url = format!("{}/dns/getroot/{}", self.settings.base_url, self.hostname);
        let response = self.send(Method::GET, &url, None).await?;

        // Error bodies carry the provider's exception, so decode either way
        let domain: std::result::Result<Domain, _> = serde_json::from_slice(&response.body);

        if response.status == StatusCode::OK {
            return match domain {
                Ok(domain) => {
                    tracing::debug!(hostname = %self.hostname, domain_id = domain.id, "Resolved domain ID");
                    Ok(domain.id)
                }
                Err(e) => Err(Error::domain_resolution(
                    &self.hostname,
                    response.status_line(),
                    "",
                    format!("invalid domain response: {}", e),
                )),
            };
        }

        let exception = domain.ok().and_then(|d| d.exception).unwrap_or_default();
        Err(Error::domain_resolution(
            &self.hostname,
            response.status_line(),
            exception.exception_type,
            exception.message,
        ))
    }

    /// Find the first record under `domain_id` with this node name and text
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /dns/:domain_id/record
    /// ```
    ///
    /// # Returns
    ///
    /// - `Ok(DnsRecord)`: The first matching record in list order
    /// - `Err(Error::RecordNotFound)`: No match, or the list was refused
    /// - `Err(Error::Transport)`: Network failure or undecodable list
    pub async fn get_dns_record(&self, domain_id: i64, node_name: &str, text_data: &str) -> Result<DnsRecord> {
        let url = self.records_url(domain_id);
        let response = self.send(Method::GET, &url, None).await?;

        if response.status != StatusCode::OK {
            tracing::debug!(domain_id, status = %response.status, "Record list refused");
            return Err(Error::record_not_found(domain_id));
        }

        let list: DnsRecordList = response.json("record list")?;
        list.dns_records
            .into_iter()
            .find(|record| record.matches(node_name, text_data))
            .ok_or_else(|| Error::record_not_found(domain_id))
    }

    /// Ensure a record exists, creating it only if no match is found
    ///
    /// # API Calls
    ///
    /// ```http
    /// GET /dns/getroot/:hostname
    /// GET /dns/:domain_id/record
    ///
    /// # Only when no matching record exists
    /// POST /dns/:domain_id/record
    /// {"nodeName": "...", "recordType": "TXT", "textData": "...", "ttl": "300", "state": true}
    /// ```
    pub async fn create_dns_record(&self, record: &DnsRecordRequest) -> Result<EnsureResult> {
        let domain_id = self.get_domain_id().await?;

        match self
            .get_dns_record(domain_id, &record.node_name, &record.text_data)
            .await
        {
            Ok(existing) => {
                tracing::info!(
                    hostname = %self.hostname,
                    node = %record.node_name,
                    record_id = existing.id,
                    "DNS record already present"
                );
                return Ok(EnsureResult::Existing {
                    record_id: existing.id,
                });
            }
            Err(e) if e.is_record_not_found() => {}
            Err(e) => return Err(e),
        }

        let url = self.records_url(domain_id);
        let body = serde_json::to_vec(record)?;
        let response = self.send(Method::POST, &url, Some(body)).await?;

        if response.status != StatusCode::OK {
            return Err(Error::record_create(response.status_line(), url));
        }

        let created: DnsRecord = response.json("created record")?;
        tracing::info!(
            hostname = %self.hostname,
            node = %record.node_name,
            record_id = created.id,
            "DNS record created"
        );
        Ok(EnsureResult::Created {
            record_id: created.id,
        })
    }

    /// Delete the record matching node name and text, if any
    ///
    /// # API Calls
    ///
    /// ```http
    /// GET /dns/getroot/:hostname
    /// GET /dns/:domain_id/record
    ///
    /// # Only when a matching record exists
    /// DELETE /dns/:domain_id/record/:record_id
    /// ```
    pub async fn remove_dns_record(&self, node_name: &str, text_data: &str) -> Result<RemoveResult> {
        let domain_id = self.get_domain_id().await?;

        let record = match self.get_dns_record(domain_id, node_name, text_data).await {
            Ok(record) => record,
            Err(e) if e.is_record_not_found() => {
                tracing::warn!(
                    hostname = %self.hostname,
                    node = node_name,
                    domain_id,
                    "No matching DNS record to remove"
                );
                return Ok(RemoveResult::AlreadyAbsent);
            }
            Err(e) => return Err(e),
        };

        let url = format!("{}/{}", self.records_url(domain_id), record.id);
        let response = self.send(Method::DELETE, &url, None).await?;

        if response.status != StatusCode::OK {
            return Err(Error::record_delete(response.status_line()));
        }

        tracing::info!(
            hostname = %self.hostname,
            node = node_name,
            record_id = record.id,
            "DNS record removed"
        );
        Ok(RemoveResult::Deleted {
            record_id: record.id,
        })
    }
}
