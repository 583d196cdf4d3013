//! Shared fixtures for Dynu API tests
//!
//! A `wiremock` server stands in for the Dynu API under the `/v2` prefix.
//! Clients built here never pace, so tests run without real delays.

#![allow(dead_code)]

use async_trait::async_trait;
use dns01_core::{ApiKey, Pacer};
use dns01_provider_dynu::{DynuClient, DynuSettings};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const HOSTNAME: &str = "example.com";
pub const DOMAIN_ID: i64 = 98765;
pub const NODE_NAME: &str = "txt";
pub const TXT_DATA: &str = "123==";

/// Settings pointing at the mock server, without pacing
pub fn settings(server: &MockServer) -> DynuSettings {
    DynuSettings::new(format!("{}/v2", server.uri())).without_pacing()
}

/// Client for `HOSTNAME` against the mock server
pub fn client(server: &MockServer) -> DynuClient {
    DynuClient::new(HOSTNAME, ApiKey::new(API_KEY).unwrap(), settings(server)).unwrap()
}

/// Body of a successful getroot response
pub fn domain_json(domain_id: i64) -> Value {
    json!({
        "statusCode": 200,
        "id": domain_id,
        "domainName": HOSTNAME,
        "hostname": HOSTNAME,
        "node": ""
    })
}

/// One TXT record as the API returns it
pub fn txt_record_json(id: i64, node_name: &str, text_data: &str) -> Value {
    json!({
        "statusCode": 200,
        "id": id,
        "domainId": DOMAIN_ID,
        "domainName": HOSTNAME,
        "nodeName": node_name,
        "hostname": format!("{}.{}", node_name, HOSTNAME),
        "recordType": "TXT",
        "ttl": 90,
        "state": true,
        "content": format!("{}.{} 90 IN TXT \"{}\"", node_name, HOSTNAME, text_data),
        "updatedOn": "2020-10-29T23:00",
        "textData": text_data
    })
}

/// Record list body
pub fn record_list_json(records: Vec<Value>) -> Value {
    json!({ "statusCode": 200, "dnsRecords": records })
}

pub fn getroot_path() -> String {
    format!("/v2/dns/getroot/{}", HOSTNAME)
}

pub fn records_path() -> String {
    format!("/v2/dns/{}/record", DOMAIN_ID)
}

/// getroot answers with `DOMAIN_ID`
pub async fn mount_domain(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(getroot_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(domain_json(DOMAIN_ID)))
        .mount(server)
        .await;
}

/// Record list answers with `records`
pub async fn mount_record_list(server: &MockServer, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_list_json(records)))
        .mount(server)
        .await;
}

/// Number of received requests with the given method
pub async fn count_requests(server: &MockServer, http_method: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.as_str() == http_method)
        .count()
}

/// Pacer that only counts how often it was consulted
#[derive(Debug, Default)]
pub struct CountingPacer {
    calls: AtomicUsize,
}

impl CountingPacer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pace(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
