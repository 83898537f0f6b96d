//! Key generation.
//!
//! Keys have the form `<prefix>:<tag>:<n>` where `n` is drawn from a small,
//! fixed range per workload. The bounded ranges keep the key space hot and
//! make writes, reads and deletes collide on the same keys.

use rand::Rng;

/// A bounded key space for one workload (inclusive range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpace {
    pub tag: &'static str,
    pub min: u64,
    pub max: u64,
}

/// Point keys written by the kv workload and removed by the delete workload.
pub const KV_KEYS: KeySpace = KeySpace::new("kv", 1, 1000);
pub const COUNTER_KEYS: KeySpace = KeySpace::new("counter", 1, 50);
pub const HASH_KEYS: KeySpace = KeySpace::new("hash", 1, 100);
pub const LIST_KEYS: KeySpace = KeySpace::new("list", 1, 20);
/// Every key in this space is written by each pipeline batch.
pub const PIPELINE_KEYS: KeySpace = KeySpace::new("pipe", 0, 19);

/// Suffix of the pub/sub channel name.
pub const EVENTS_CHANNEL: &str = "events";

impl KeySpace {
    pub const fn new(tag: &'static str, min: u64, max: u64) -> Self {
        Self { tag, min, max }
    }

    /// Number of distinct keys in this space.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.max - self.min + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    pub fn contains(&self, n: u64) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Format the key for index `n`.
    pub fn key(&self, prefix: &str, n: u64) -> String {
        format!("{prefix}:{}:{n}", self.tag)
    }

    /// Pick a uniformly random key from this space.
    pub fn random_key<R: Rng>(&self, prefix: &str, rng: &mut R) -> String {
        self.key(prefix, rng.random_range(self.min..=self.max))
    }

    /// All keys in this space, in order.
    pub fn keys(self, prefix: &str) -> impl Iterator<Item = String> + '_ {
        (self.min..=self.max).map(move |n| self.key(prefix, n))
    }

    /// Parse `<prefix>:<tag>:<n>` back into `n`, if the key belongs to this space.
    pub fn index_of(&self, prefix: &str, key: &str) -> Option<u64> {
        let rest = key.strip_prefix(prefix)?.strip_prefix(':')?;
        let n = rest.strip_prefix(self.tag)?.strip_prefix(':')?;
        n.parse().ok().filter(|n| self.contains(*n))
    }
}

/// Channel the pubsub workload publishes to.
pub fn events_channel(prefix: &str) -> String {
    format!("{prefix}:{EVENTS_CHANNEL}")
}
