// # Pacer Trait
//
// Request pacing policy applied by provider clients before each API call.
//
// Providers with strict rate limits reject bursts. Rather than sleeping
// inline, clients await an injected `Pacer`, so the policy can be tuned
// by configuration and replaced in tests.

use async_trait::async_trait;

/// Trait for request pacing policies
#[async_trait]
pub trait Pacer: Send + Sync + std::fmt::Debug {
    /// Wait until the next request may be issued
    async fn pace(&self);
}
