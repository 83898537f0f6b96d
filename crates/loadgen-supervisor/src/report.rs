//! What the supervisor knows about its runners once it has stopped.

use loadgen_workload::{StatsSnapshot, WorkloadKind};
use tracing::{info, warn};

/// How a runner ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerExit {
    /// Observed cancellation (or finished its single pass) and returned.
    Stopped,
    /// Panicked; not restarted.
    Panicked,
    /// Did not stop within the shutdown timeout and was aborted.
    Aborted,
}

impl std::fmt::Display for RunnerExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerExit::Stopped => write!(f, "stopped"),
            RunnerExit::Panicked => write!(f, "panicked"),
            RunnerExit::Aborted => write!(f, "aborted"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerReport {
    pub kind: WorkloadKind,
    pub stats: StatsSnapshot,
    pub exit: RunnerExit,
}

#[derive(Debug, Clone, Default)]
pub struct SupervisorReport {
    pub runners: Vec<RunnerReport>,
}

impl SupervisorReport {
    pub fn totals(&self) -> StatsSnapshot {
        self.runners.iter().map(|r| r.stats).sum()
    }

    /// Runners that did not stop on their own.
    pub fn unstopped(&self) -> impl Iterator<Item = &RunnerReport> {
        self.runners
            .iter()
            .filter(|r| r.exit != RunnerExit::Stopped)
    }

    pub fn all_stopped(&self) -> bool {
        self.unstopped().next().is_none()
    }

    pub fn runner(&self, kind: WorkloadKind) -> Option<&RunnerReport> {
        self.runners.iter().find(|r| r.kind == kind)
    }

    /// Log one line per runner plus the totals.
    pub fn log_summary(&self) {
        for runner in &self.runners {
            if runner.exit == RunnerExit::Stopped {
                info!("{} workload {}: {}", runner.kind, runner.exit, runner.stats);
            } else {
                warn!("{} workload {}: {}", runner.kind, runner.exit, runner.stats);
            }
        }
        info!("Total: {}", self.totals());
    }
}
