//! The workload abstraction.

use crate::error::WorkloadError;
use crate::kind::WorkloadKind;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// One Redis access pattern, executed one iteration at a time.
///
/// Implementations keep whatever state they need between iterations (their
/// RNG, a sequence number) and are reused when a runner restarts after a
/// failure. `C` is the connection handle; it is shared by cloning, so it must
/// be safe to use from many tasks at once.
#[async_trait]
pub trait Workload<C>: Send {
    fn kind(&self) -> WorkloadKind;

    /// Pause between two iterations.
    fn interval(&self) -> Duration;

    /// Perform one iteration against the store.
    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError>;
}

/// Settings shared by all workloads.
#[derive(Debug, Clone)]
pub struct WorkloadContext {
    /// Namespace prepended to every key and channel.
    pub key_prefix: String,
    /// Pause used by the kv, counter, hash and list workloads.
    pub delay: Duration,
    /// Base seed; each workload derives its own RNG from it.
    pub seed: u64,
}

impl WorkloadContext {
    pub fn new(key_prefix: impl Into<String>, delay: Duration, seed: u64) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            delay,
            seed,
        }
    }

    /// Seed for the given workload, so workloads do not share a random sequence.
    pub fn seed_for(&self, kind: WorkloadKind) -> u64 {
        let index = kind.index() as u64 + 1;
        self.seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
    }

    pub fn rng_for(&self, kind: WorkloadKind) -> StdRng {
        StdRng::seed_from_u64(self.seed_for(kind))
    }
}
