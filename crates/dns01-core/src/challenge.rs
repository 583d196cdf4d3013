// # Challenge Requests
//
// The host hands every Present/CleanUp call a `ChallengeRequest`. Solvers
// derive everything they need from it on each call: the zone hostname used
// for the provider's domain lookup and the node name used to match records.
// Nothing derived here is stored between calls.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Record type used for every challenge record
pub const CHALLENGE_RECORD_TYPE: &str = "TXT";

/// A DNS-01 challenge as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Fully qualified challenge record name (e.g. "_acme-challenge.example.com.")
    pub resolved_fqdn: String,

    /// Zone the record lives in (e.g. "example.com.")
    pub resolved_zone: String,

    /// Namespace used for secret lookups
    #[serde(default)]
    pub resource_namespace: String,

    /// Expected TXT value
    pub key: String,

    /// Opaque per-issuer solver configuration
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    /// Create a challenge request without solver configuration
    pub fn new(
        resolved_fqdn: impl Into<String>,
        resolved_zone: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            resolved_fqdn: resolved_fqdn.into(),
            resolved_zone: resolved_zone.into(),
            resource_namespace: String::new(),
            key: key.into(),
            config: None,
        }
    }

    /// Set the namespace used for secret lookups
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.resource_namespace = namespace.into();
        self
    }

    /// Attach the per-issuer solver configuration blob
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Zone hostname without the trailing root dot
    ///
    /// "example.com." -> "example.com"
    pub fn zone_hostname(&self) -> &str {
        self.resolved_zone
            .strip_suffix('.')
            .unwrap_or(&self.resolved_zone)
    }

    /// Record label relative to the zone
    ///
    /// The zone suffix is removed from the FQDN, then the separating dot.
    /// A challenge at the zone apex yields an empty node name.
    ///
    /// ```
    /// use dns01_core::ChallengeRequest;
    ///
    /// let ch = ChallengeRequest::new("_acme-challenge.example.com.", "example.com.", "k");
    /// assert_eq!(ch.node_name().unwrap(), "_acme-challenge");
    /// ```
    pub fn node_name(&self) -> Result<String> {
        if self.resolved_zone.is_empty() {
            return Err(Error::invalid_input("Resolved zone cannot be empty"));
        }

        let fqdn = normalize_fqdn(&self.resolved_fqdn);
        let zone = normalize_fqdn(&self.resolved_zone);
        let outside_zone = || {
            Error::invalid_input(format!(
                "FQDN '{}' is not inside zone '{}'",
                self.resolved_fqdn, self.resolved_zone
            ))
        };

        // Zone comparison ignores case, the label keeps the caller's spelling
        let split = fqdn
            .len()
            .checked_sub(zone.len())
            .filter(|&at| fqdn.is_char_boundary(at))
            .ok_or_else(outside_zone)?;
        let (prefix, suffix) = fqdn.split_at(split);
        if !suffix.eq_ignore_ascii_case(&zone) {
            return Err(outside_zone());
        }

        if prefix.is_empty() {
            return Ok(String::new());
        }

        // "sub.example.com." minus "example.com." must leave "sub."; anything
        // else means the zone matched mid-label ("myexample.com.").
        prefix
            .strip_suffix('.')
            .map(str::to_string)
            .ok_or_else(outside_zone)
    }
}

/// Trim whitespace and ensure a single trailing dot
fn normalize_fqdn(name: &str) -> String {
    format!("{}.", name.trim().trim_end_matches('.'))
}
