//! In-memory workloads for exercising the supervisor without a Redis server.

use async_trait::async_trait;
use loadgen_workload::{Workload, WorkloadError, WorkloadKind};
use std::time::Duration;

fn injected_failure(kind: WorkloadKind) -> WorkloadError {
    let source = redis::RedisError::from((redis::ErrorKind::IoError, "injected failure"));
    WorkloadError::command(kind, "TEST")(source)
}

/// Succeeds immediately on every step.
pub(crate) struct TickWorkload {
    kind: WorkloadKind,
    interval: Duration,
}

impl TickWorkload {
    pub(crate) fn new(kind: WorkloadKind, interval: Duration) -> Self {
        Self { kind, interval }
    }
}

#[async_trait]
impl<C: Send> Workload<C> for TickWorkload {
    fn kind(&self) -> WorkloadKind {
        self.kind
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn step(&mut self, _conn: &mut C) -> Result<(), WorkloadError> {
        Ok(())
    }
}

/// Fails the first `failures` steps, then succeeds.
pub(crate) struct FailingWorkload {
    kind: WorkloadKind,
    remaining_failures: u32,
}

impl FailingWorkload {
    pub(crate) fn new(kind: WorkloadKind, failures: u32) -> Self {
        Self {
            kind,
            remaining_failures: failures,
        }
    }
}

#[async_trait]
impl<C: Send> Workload<C> for FailingWorkload {
    fn kind(&self) -> WorkloadKind {
        self.kind
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(5)
    }

    async fn step(&mut self, _conn: &mut C) -> Result<(), WorkloadError> {
        if self.remaining_failures > 0 {
            self.remaining_failures -= 1;
            return Err(injected_failure(self.kind));
        }
        Ok(())
    }
}

/// A step that takes far longer than any shutdown timeout, like a hung command.
pub(crate) struct StuckWorkload {
    kind: WorkloadKind,
}

impl StuckWorkload {
    pub(crate) fn new(kind: WorkloadKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl<C: Send> Workload<C> for StuckWorkload {
    fn kind(&self) -> WorkloadKind {
        self.kind
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(5)
    }

    async fn step(&mut self, _conn: &mut C) -> Result<(), WorkloadError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Panics on its first step.
pub(crate) struct PanickingWorkload {
    kind: WorkloadKind,
}

impl PanickingWorkload {
    pub(crate) fn new(kind: WorkloadKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl<C: Send> Workload<C> for PanickingWorkload {
    fn kind(&self) -> WorkloadKind {
        self.kind
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(5)
    }

    async fn step(&mut self, _conn: &mut C) -> Result<(), WorkloadError> {
        panic!("{} workload blew up", self.kind);
    }
}
