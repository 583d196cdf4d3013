// # Pacing Policies
//
// Implementations of the `Pacer` trait.
//
// - `FixedDelayPacer`: sleeps a fixed interval before every request. Each
//   caller pays the delay independently; concurrent callers do not wait on
//   each other.
// - `MinIntervalPacer`: spaces request starts at least `interval` apart
//   across all callers sharing the pacer.
// - `NoPacing`: returns immediately (tests, unrestricted endpoints).

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::traits::Pacer;

/// Default delay before every provider request (5 seconds)
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(5);

/// Unconditional delay before every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    /// Create a pacer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pace(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Minimum spacing between request starts
///
/// Slots are reserved under a short lock and awaited outside it, so a
/// waiting caller never blocks another caller from reserving the next slot.
#[derive(Debug)]
pub struct MinIntervalPacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl MinIntervalPacer {
    /// Create a pacer with the given minimum interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Pacer for MinIntervalPacer {
    async fn pace(&self) {
        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(next) if next > now => next,
                _ => now,
            };
            *next_slot = Some(slot + self.interval);
            slot
        };

        tokio::time::sleep_until(slot).await;
    }
}

/// No pacing at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pace(&self) {}
}
