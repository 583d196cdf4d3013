//! Architectural Contract Test: Solver Lifecycle
//!
//! Constraints verified:
//! - Solvers are created through the registry by configured name
//! - Present and CleanUp are idempotent and carry no state between calls
//! - Credentials come from the challenge config, inline or via secret reference
//! - Invalid challenges fail before the solver touches any record
//!
//! If this test fails, the solver plumbing is broken.

mod common;

use common::*;
use dns01_core::{
    DirectorySecretStore, Error, MemorySecretStore, ProviderConfig, SecretStore, SolverRegistry,
};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn registry() -> (SolverRegistry, Arc<RecordingState>) {
    let registry = SolverRegistry::new();
    let (factory, state) = RecordingFactory::new();
    registry.register_solver("recording", Box::new(factory));
    (registry, state)
}

fn no_secrets() -> Arc<dyn SecretStore> {
    Arc::new(MemorySecretStore::new())
}

#[tokio::test]
async fn solver_selected_by_configured_name() {
    let (registry, _) = registry();

    let solver = assert_ok!(registry.create_solver(&recording_config(), no_secrets()));
    assert_eq!(solver.name(), "recording");

    // Nothing registered under "dynu" in this registry
    match registry.create_solver(&ProviderConfig::dynu(), no_secrets()) {
        Err(err) => assert!(err.to_string().contains("Unknown solver type: dynu")),
        Ok(solver) => panic!("unexpected solver {}", solver.name()),
    }
}

#[tokio::test]
async fn present_twice_writes_one_record() {
    let (registry, state) = registry();
    let solver = registry.create_solver(&recording_config(), no_secrets()).unwrap();
    let challenge = challenge("123==");

    assert_ok!(solver.present(&challenge).await);
    assert_ok!(solver.present(&challenge).await);

    assert_eq!(state.creates(), 1);
    assert!(state.contains("_acme-challenge", "123=="));
}

#[tokio::test]
async fn clean_up_without_present_succeeds() {
    let (registry, state) = registry();
    let solver = registry.create_solver(&recording_config(), no_secrets()).unwrap();

    assert_ok!(solver.clean_up(&challenge("never-presented")).await);
    assert_eq!(state.deletes(), 0);
}

#[tokio::test]
async fn clean_up_from_fresh_solver_removes_record() {
    let (registry, state) = registry();
    let challenge = challenge("123==");

    let first = registry.create_solver(&recording_config(), no_secrets()).unwrap();
    assert_ok!(first.present(&challenge).await);
    drop(first);

    // A new instance knows nothing about the first one
    let second = registry.create_solver(&recording_config(), no_secrets()).unwrap();
    assert_ok!(second.clean_up(&challenge).await);
    assert_ok!(second.clean_up(&challenge).await);

    assert_eq!(state.deletes(), 1);
    assert_eq!(state.len(), 0);
}

#[tokio::test]
async fn parallel_challenges_on_one_node_are_independent() {
    let (registry, state) = registry();
    let solver = registry.create_solver(&recording_config(), no_secrets()).unwrap();
    let wildcard = challenge("token-wildcard");
    let apex = challenge("token-apex");

    let (a, b) = tokio::join!(solver.present(&wildcard), solver.present(&apex));
    assert_ok!(a);
    assert_ok!(b);
    assert_eq!(state.len(), 2);

    assert_ok!(solver.clean_up(&wildcard).await);
    assert!(!state.contains("_acme-challenge", "token-wildcard"));
    assert!(state.contains("_acme-challenge", "token-apex"));
}

#[tokio::test]
async fn api_key_resolved_from_mounted_secret() {
    let dir = tempfile::tempdir().unwrap();
    let secret_dir = dir.path().join("cert-manager").join("dynu-secret");
    std::fs::create_dir_all(&secret_dir).unwrap();
    std::fs::write(secret_dir.join("api-key"), "mounted-key\n").unwrap();

    let (registry, state) = registry();
    let secrets: Arc<dyn SecretStore> = Arc::new(DirectorySecretStore::new(dir.path()));
    let solver = registry.create_solver(&recording_config(), secrets).unwrap();

    let challenge = challenge("123==")
        .with_namespace("cert-manager")
        .with_config(serde_json::json!({
            "apikeySecretKeyRef": { "name": "dynu-secret", "key": "api-key" }
        }));

    assert_ok!(solver.present(&challenge).await);
    assert_eq!(*state.keys_seen.lock().unwrap(), vec!["mounted-key".to_string()]);
}

#[tokio::test]
async fn invalid_challenges_touch_nothing() {
    let (registry, state) = registry();
    let solver = registry.create_solver(&recording_config(), no_secrets()).unwrap();

    // FQDN outside the zone
    let outside = dns01_core::ChallengeRequest::new("_acme-challenge.other.org.", "example.com.", "k")
        .with_config(serde_json::json!({ "apiKey": "inline-key" }));
    let err = assert_err!(solver.present(&outside).await);
    assert!(matches!(err, Error::InvalidInput(_)));

    // No credentials configured at all
    let bare = dns01_core::ChallengeRequest::new("_acme-challenge.example.com.", "example.com.", "k");
    let err = assert_err!(solver.present(&bare).await);
    assert!(matches!(err, Error::Config(_)));

    // Reference to a secret that does not exist
    let dangling = challenge("k").with_config(serde_json::json!({
        "apikeySecretKeyRef": { "name": "missing", "key": "api-key" }
    }));
    let err = assert_err!(solver.present(&dangling).await);
    assert!(matches!(err, Error::Credentials(_)));

    assert_eq!(state.creates(), 0);
    assert!(state.keys_seen.lock().unwrap().is_empty());
}
