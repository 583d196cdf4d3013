//! Dynu API v2 wire types
//!
//! Responses are decoded leniently: missing or `null` fields fall back to
//! their defaults, since the record list mixes record types and not every
//! type carries every field.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default value
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error details the API attaches to failed responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiException {
    #[serde(deserialize_with = "nullable")]
    pub status_code: i64,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub exception_type: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}

/// Root domain returned by `GET /dns/getroot/{hostname}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Domain {
    #[serde(deserialize_with = "nullable")]
    pub status_code: i64,
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub domain_name: String,
    #[serde(deserialize_with = "nullable")]
    pub node: String,
    pub exception: Option<ApiException>,
}

/// Record payload for `POST /dns/{domainId}/record`
///
/// TTL travels as a string here, while responses carry it as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordRequest {
    pub node_name: String,
    pub record_type: String,
    pub text_data: String,
    pub ttl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<i64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub state: bool,
}

impl DnsRecordRequest {
    /// Enabled TXT record with the given node name, value and TTL
    pub fn txt(node_name: impl Into<String>, text_data: impl Into<String>, ttl: u32) -> Self {
        Self {
            node_name: node_name.into(),
            record_type: dns01_core::CHALLENGE_RECORD_TYPE.to_string(),
            text_data: text_data.into(),
            ttl: ttl.to_string(),
            domain_id: None,
            state: true,
        }
    }
}

/// A DNS record as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(deserialize_with = "nullable")]
    pub status_code: i64,
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub domain_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub domain_name: String,
    #[serde(deserialize_with = "nullable")]
    pub node_name: String,
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub record_type: String,
    #[serde(deserialize_with = "nullable")]
    pub ttl: i64,
    #[serde(deserialize_with = "nullable")]
    pub state: bool,
    #[serde(deserialize_with = "nullable")]
    pub content: String,
    #[serde(deserialize_with = "nullable")]
    pub updated_on: String,
    #[serde(deserialize_with = "nullable")]
    pub text_data: String,
}

impl DnsRecord {
    /// Whether this record carries the given node name and text
    pub fn matches(&self, node_name: &str, text_data: &str) -> bool {
        self.node_name == node_name && self.text_data == text_data
    }
}

/// Record list returned by `GET /dns/{domainId}/record`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DnsRecordList {
    #[serde(deserialize_with = "nullable")]
    pub status_code: i64,
    #[serde(deserialize_with = "nullable")]
    pub dns_records: Vec<DnsRecord>,
}
