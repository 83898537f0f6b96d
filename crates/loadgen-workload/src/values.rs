//! Value generators.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of values written by the kv workload.
pub const KV_VALUE_LEN: usize = 50;
/// Length of values pushed by the list workload.
pub const LIST_VALUE_LEN: usize = 20;
/// Length of values written by each pipeline SET.
pub const PIPELINE_VALUE_LEN: usize = 10;

/// Inclusive TTL range, in seconds, for kv writes.
pub const TTL_SECS: (u64, u64) = (10, 120);

/// Generate a random ASCII alphanumeric string of exactly `len` characters.
pub fn random_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Generate a random TTL for kv writes.
pub fn random_ttl<R: Rng>(rng: &mut R) -> u64 {
    rng.random_range(TTL_SECS.0..=TTL_SECS.1)
}

/// Fields written to a record by the hash workload.
#[derive(Debug, Clone, PartialEq)]
pub struct HashFields {
    pub views: u32,
    pub likes: u32,
    /// Unix time in seconds, with sub-second precision.
    pub updated_at: f64,
}

impl HashFields {
    pub fn random<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Self {
        Self {
            views: rng.random_range(1..=10_000),
            likes: rng.random_range(1..=5_000),
            updated_at: now.timestamp_micros() as f64 / 1_000_000.0,
        }
    }

    /// Field/value pairs in HSET argument order.
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("views", self.views.to_string()),
            ("likes", self.likes.to_string()),
            ("updated_at", self.updated_at.to_string()),
        ]
    }
}
