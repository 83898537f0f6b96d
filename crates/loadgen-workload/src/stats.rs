//! Per-runner counters shared between a runner and the supervisor.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one workload runner.
#[derive(Debug, Default)]
pub struct WorkloadStats {
    ops: AtomicU64,
    errors: AtomicU64,
    restarts: AtomicU64,
}

impl WorkloadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed iteration.
    pub fn record_op(&self) {
        self.ops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_restart(&self) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ops: self.ops.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            restarts: self.restarts.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`WorkloadStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Completed iterations.
    pub ops: u64,
    /// Failed iterations.
    pub errors: u64,
    /// Restarts after a failure.
    pub restarts: u64,
}

impl std::ops::Add for StatsSnapshot {
    type Output = StatsSnapshot;

    fn add(self, rhs: Self) -> Self::Output {
        StatsSnapshot {
            ops: self.ops + rhs.ops,
            errors: self.errors + rhs.errors,
            restarts: self.restarts + rhs.restarts,
        }
    }
}

impl std::iter::Sum for StatsSnapshot {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(StatsSnapshot::default(), |acc, s| acc + s)
    }
}

impl std::fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ops={}, errors={}, restarts={}",
            self.ops, self.errors, self.restarts
        )
    }
}
