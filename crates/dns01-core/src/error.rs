//! Error types for the DNS-01 solver system
//!
//! This module defines all error types used throughout the crate.
//!
//! The reconciliation stages each have their own variant so callers can
//! tell which stage failed without inspecting message text. In particular,
//! [`Error::RecordNotFound`] is a tagged variant that cleanup paths match on
//! to treat an already-absent record as success.

use thiserror::Error;

/// Result type alias for DNS-01 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DNS-01 solver system
#[derive(Error, Debug)]
pub enum Error {
    /// The zone hostname could not be mapped to a provider domain ID
    #[error("Unable to resolve domain ID for '{hostname}' ({status}): {exception_type}: {message}")]
    DomainResolution {
        /// Zone hostname that was looked up
        hostname: String,
        /// HTTP status line of the getroot response
        status: String,
        /// Exception type reported by the provider (empty if unavailable)
        exception_type: String,
        /// Exception message reported by the provider (or local decode failure)
        message: String,
    },

    /// The record list was retrieved but no record matched
    #[error("Unable to find DNS records for domain ID: {domain_id}")]
    RecordNotFound {
        /// Provider domain ID that was searched
        domain_id: i64,
    },

    /// The provider rejected a record creation
    #[error("Failed to create DNS record: {status} received for {url}")]
    RecordCreate {
        /// HTTP status line (e.g. "400 Bad Request")
        status: String,
        /// Target URL of the POST
        url: String,
    },

    /// The provider rejected a record deletion
    #[error("Failed to delete DNS record: {status}")]
    RecordDelete {
        /// HTTP status line
        status: String,
    },

    /// Network, timeout or response decoding failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential lookup errors
    #[error("Credential error: {0}")]
    Credentials(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a domain resolution error
    pub fn domain_resolution(
        hostname: impl Into<String>,
        status: impl Into<String>,
        exception_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DomainResolution {
            hostname: hostname.into(),
            status: status.into(),
            exception_type: exception_type.into(),
            message: message.into(),
        }
    }

    /// Create a "record not found" error
    pub fn record_not_found(domain_id: i64) -> Self {
        Self::RecordNotFound { domain_id }
    }

    /// Create a record creation error
    pub fn record_create(status: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RecordCreate {
            status: status.into(),
            url: url.into(),
        }
    }

    /// Create a record deletion error
    pub fn record_delete(status: impl Into<String>) -> Self {
        Self::RecordDelete {
            status: status.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a credential error
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error means "no matching record exists"
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Name of the reconciliation stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            Self::DomainResolution { .. } => "resolve",
            Self::RecordNotFound { .. } => "find",
            Self::RecordCreate { .. } => "create",
            Self::RecordDelete { .. } => "delete",
            Self::Transport(_) => "transport",
            Self::Config(_) | Self::Json(_) => "config",
            Self::Credentials(_) => "credentials",
            Self::InvalidInput(_) => "input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_tagged() {
        assert!(Error::record_not_found(42).is_record_not_found());
        assert!(!Error::transport("connection reset").is_record_not_found());
        assert!(!Error::record_delete("500 Internal Server Error").is_record_not_found());
    }

    #[test]
    fn test_messages_identify_stage() {
        let err = Error::domain_resolution("example.com", "404 Not Found", "DomainNotFound", "no such domain");
        let text = err.to_string();
        assert!(text.contains("example.com"));
        assert!(text.contains("404"));
        assert!(text.contains("DomainNotFound"));
        assert_eq!(err.stage(), "resolve");

        let err = Error::record_create("400 Bad Request", "https://api.dynu.com/v2/dns/1/record");
        assert!(err.to_string().contains("400 Bad Request"));
        assert!(err.to_string().contains("/dns/1/record"));
        assert_eq!(err.stage(), "create");

        let err = Error::record_not_found(98765);
        assert!(err.to_string().contains("98765"));
    }

    #[test]
    fn test_every_error_names_a_stage() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let stages: Vec<&str> = [
            Error::domain_resolution("example.com", "404 Not Found", "", ""),
            Error::record_not_found(1),
            Error::record_create("400 Bad Request", "https://api.dynu.com/v2/dns/1/record"),
            Error::record_delete("500 Internal Server Error"),
            Error::transport("connection reset"),
            Error::config("bad"),
            Error::credentials("missing"),
            Error::invalid_input("outside zone"),
            Error::from(json_err),
        ]
        .iter()
        .map(Error::stage)
        .collect();

        assert_eq!(
            stages,
            vec![
                "resolve",
                "find",
                "create",
                "delete",
                "transport",
                "config",
                "credentials",
                "input",
                "config"
            ]
        );
    }
}
