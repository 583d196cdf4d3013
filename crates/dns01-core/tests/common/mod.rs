//! Test doubles and common utilities for solver contract tests
//!
//! `RecordingSolver` keeps its TXT records in memory and behaves like a
//! well-formed provider: present is a no-op when the record already exists
//! and clean up of an absent record succeeds.

#![allow(dead_code)]

use async_trait::async_trait;
use dns01_core::config::ProviderConfig;
use dns01_core::error::Result;
use dns01_core::traits::{ChallengeSolver, SecretStore, SolverFactory};
use dns01_core::{ChallengeRequest, SolverConfig, resolve_api_key};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared view of what a `RecordingSolver` has written
#[derive(Debug, Default)]
pub struct RecordingState {
    /// Current (node name, value) records
    pub records: Mutex<HashSet<(String, String)>>,
    /// Records actually written
    pub creates: AtomicUsize,
    /// Records actually removed
    pub deletes: AtomicUsize,
    /// API keys seen, for credential plumbing checks
    pub keys_seen: Mutex<Vec<String>>,
}

impl RecordingState {
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn contains(&self, node_name: &str, value: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .contains(&(node_name.to_string(), value.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

/// In-memory solver that resolves credentials like a real provider
pub struct RecordingSolver {
    state: Arc<RecordingState>,
    secrets: Arc<dyn SecretStore>,
}

impl RecordingSolver {
    async fn authenticate(&self, challenge: &ChallengeRequest) -> Result<()> {
        let config = SolverConfig::from_json(challenge.config.as_ref())?;
        config.validate()?;
        let key = resolve_api_key(&config, &challenge.resource_namespace, self.secrets.as_ref()).await?;
        self.state
            .keys_seen
            .lock()
            .unwrap()
            .push(key.expose().to_string());
        Ok(())
    }
}

#[async_trait]
impl ChallengeSolver for RecordingSolver {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn present(&self, challenge: &ChallengeRequest) -> Result<()> {
        let node_name = challenge.node_name()?;
        self.authenticate(challenge).await?;

        let inserted = self
            .state
            .records
            .lock()
            .unwrap()
            .insert((node_name, challenge.key.clone()));
        if inserted {
            self.state.creates.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn clean_up(&self, challenge: &ChallengeRequest) -> Result<()> {
        let node_name = challenge.node_name()?;
        self.authenticate(challenge).await?;

        let removed = self
            .state
            .records
            .lock()
            .unwrap()
            .remove(&(node_name, challenge.key.clone()));
        if removed {
            self.state.deletes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Factory producing `RecordingSolver`s that share one state
#[derive(Default)]
pub struct RecordingFactory {
    pub state: Arc<RecordingState>,
}

impl RecordingFactory {
    pub fn new() -> (Self, Arc<RecordingState>) {
        let state = Arc::new(RecordingState::default());
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl SolverFactory for RecordingFactory {
    fn create(
        &self,
        _config: &ProviderConfig,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Box<dyn ChallengeSolver>> {
        Ok(Box::new(RecordingSolver {
            state: self.state.clone(),
            secrets,
        }))
    }
}

/// Provider config that selects the "recording" factory
pub fn recording_config() -> ProviderConfig {
    ProviderConfig::Custom {
        factory: "recording".to_string(),
        config: serde_json::json!({}),
    }
}

/// Challenge for `_acme-challenge.example.com.` with an inline key
pub fn challenge(key: &str) -> ChallengeRequest {
    ChallengeRequest::new("_acme-challenge.example.com.", "example.com.", key)
        .with_config(serde_json::json!({ "apiKey": "inline-key" }))
}
