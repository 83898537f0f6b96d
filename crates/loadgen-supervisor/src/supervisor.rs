//! Starts every workload runner, keeps them alive, and stops them.

use crate::config::SupervisorConfig;
use crate::report::{RunnerExit, RunnerReport, SupervisorReport};
use crate::runner;
use loadgen_workload::{StatsSnapshot, Workload, WorkloadKind, WorkloadStats};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(10);

struct RunnerSlot {
    kind: WorkloadKind,
    stats: Arc<WorkloadStats>,
    exit: Option<RunnerExit>,
}

/// Runs a set of workloads concurrently against one shared connection handle.
///
/// # Example
///
/// ```ignore
/// let mut supervisor = Supervisor::new(SupervisorConfig::default());
/// for kind in WorkloadKind::ALL {
///     supervisor.add(kind.build(&ctx));
/// }
///
/// let shutdown = CancellationToken::new();
/// shutdown_on_signal(shutdown.clone());
/// let report = supervisor.run(conn, shutdown).await;
/// report.log_summary();
/// ```
pub struct Supervisor<C> {
    config: SupervisorConfig,
    workloads: Vec<Box<dyn Workload<C>>>,
}

impl<C> Supervisor<C>
where
    C: Clone + Send + 'static,
{
    pub fn new(config: SupervisorConfig) -> Self {
        Self {
            config,
            workloads: Vec::new(),
        }
    }

    pub fn add(&mut self, workload: Box<dyn Workload<C>>) {
        self.workloads.push(workload);
    }

    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    pub fn kinds(&self) -> Vec<WorkloadKind> {
        self.workloads.iter().map(|w| w.kind()).collect()
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Run every workload until `shutdown` is cancelled.
    ///
    /// In single-pass mode this also returns once every runner has finished.
    /// After cancellation, runners get `shutdown_timeout` to stop; the rest
    /// are aborted and reported.
    pub async fn run(self, conn: C, shutdown: CancellationToken) -> SupervisorReport {
        let Supervisor { config, workloads } = self;

        if workloads.is_empty() {
            warn!("No workloads selected; nothing to run");
            return SupervisorReport::default();
        }

        let runners_cancel = shutdown.child_token();
        let mut tasks = JoinSet::new();
        let mut slots = Vec::with_capacity(workloads.len());
        let mut task_slots = HashMap::new();

        for workload in workloads {
            let kind = workload.kind();
            let stats = Arc::new(WorkloadStats::new());
            let handle = tasks.spawn(runner::supervise(
                workload,
                conn.clone(),
                runners_cancel.clone(),
                stats.clone(),
                config.clone(),
            ));
            task_slots.insert(handle.id(), slots.len());
            slots.push(RunnerSlot {
                kind,
                stats,
                exit: None,
            });
        }

        let names: Vec<&str> = slots.iter().map(|s| s.kind.as_str()).collect();
        info!("Started {} workloads: {}", slots.len(), names.join(", "));

        let period = config.heartbeat_interval.max(MIN_HEARTBEAT_INTERVAL);
        let mut heartbeat = tokio::time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Stopping load generator");
                    break;
                }
                _ = heartbeat.tick() => {
                    info!("Load generator running... ({})", totals(&slots));
                }
                Some(joined) = tasks.join_next_with_id() => {
                    record_exit(joined, &task_slots, &mut slots);
                    if tasks.is_empty() {
                        info!("All workloads finished");
                        break;
                    }
                }
            }
        }

        runners_cancel.cancel();

        let deadline = Instant::now() + config.shutdown_timeout;
        while !tasks.is_empty() {
            match tokio::time::timeout_at(deadline, tasks.join_next_with_id()).await {
                Ok(Some(joined)) => record_exit(joined, &task_slots, &mut slots),
                Ok(None) => break,
                Err(_) => {
                    for slot in slots.iter_mut().filter(|s| s.exit.is_none()) {
                        warn!(
                            "{} workload did not stop within {:?}; aborting it",
                            slot.kind, config.shutdown_timeout
                        );
                        slot.exit = Some(RunnerExit::Aborted);
                    }
                    tasks.shutdown().await;
                    break;
                }
            }
        }

        SupervisorReport {
            runners: slots
                .into_iter()
                .map(|slot| RunnerReport {
                    kind: slot.kind,
                    stats: slot.stats.snapshot(),
                    exit: slot.exit.unwrap_or(RunnerExit::Aborted),
                })
                .collect(),
        }
    }
}

fn totals(slots: &[RunnerSlot]) -> StatsSnapshot {
    slots.iter().map(|s| s.stats.snapshot()).sum()
}

fn record_exit(
    joined: Result<(Id, WorkloadKind), JoinError>,
    task_slots: &HashMap<Id, usize>,
    slots: &mut [RunnerSlot],
) {
    match joined {
        Ok((id, kind)) => {
            debug!("{kind} runner joined");
            if let Some(&index) = task_slots.get(&id) {
                slots[index].exit = Some(RunnerExit::Stopped);
            }
        }
        Err(e) => {
            let exit = if e.is_panic() {
                RunnerExit::Panicked
            } else {
                RunnerExit::Aborted
            };
            match task_slots.get(&e.id()) {
                Some(&index) => {
                    error!("{} workload {exit}: {e}", slots[index].kind);
                    slots[index].exit = Some(exit);
                }
                None => error!("Unknown workload runner {exit}: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingWorkload, PanickingWorkload, StuckWorkload, TickWorkload};

    fn fast_config() -> SupervisorConfig {
        SupervisorConfig {
            heartbeat_interval: Duration::from_millis(20),
            shutdown_timeout: Duration::from_secs(2),
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            ..SupervisorConfig::default()
        }
    }

    fn cancel_after(token: &CancellationToken, after: Duration) {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            token.cancel();
        });
    }

    #[tokio::test]
    async fn test_all_runners_stop_on_shutdown() {
        let mut supervisor: Supervisor<()> = Supervisor::new(fast_config());
        for kind in WorkloadKind::ALL {
            supervisor.add(Box::new(TickWorkload::new(kind, Duration::from_millis(5))));
        }
        assert_eq!(supervisor.len(), 7);

        let shutdown = CancellationToken::new();
        cancel_after(&shutdown, Duration::from_millis(100));
        let report = supervisor.run((), shutdown).await;

        assert_eq!(report.runners.len(), 7);
        assert!(report.all_stopped(), "{report:?}");
        for runner in &report.runners {
            assert!(runner.stats.ops > 0, "{:?} never ran", runner.kind);
        }
    }

    #[tokio::test]
    async fn test_failing_runner_does_not_stop_others() {
        let mut supervisor: Supervisor<()> = Supervisor::new(fast_config());
        supervisor.add(Box::new(FailingWorkload::new(WorkloadKind::Hash, 3)));
        supervisor.add(Box::new(TickWorkload::new(
            WorkloadKind::Counter,
            Duration::from_millis(5),
        )));

        let shutdown = CancellationToken::new();
        cancel_after(&shutdown, Duration::from_millis(150));
        let report = supervisor.run((), shutdown).await;

        assert!(report.all_stopped());
        let hash = report.runner(WorkloadKind::Hash).unwrap();
        assert_eq!(hash.stats.errors, 3);
        assert_eq!(hash.stats.restarts, 3);
        assert!(hash.stats.ops > 0);
        let counter = report.runner(WorkloadKind::Counter).unwrap();
        assert_eq!(counter.stats.errors, 0);
        assert!(counter.stats.ops > 0);
    }

    #[tokio::test]
    async fn test_single_pass_returns_without_shutdown() {
        let config = SupervisorConfig {
            run_forever: false,
            ..fast_config()
        };
        let mut supervisor: Supervisor<()> = Supervisor::new(config);
        for kind in WorkloadKind::ALL {
            supervisor.add(Box::new(TickWorkload::new(kind, Duration::from_secs(60))));
        }

        let report = tokio::time::timeout(
            Duration::from_secs(5),
            supervisor.run((), CancellationToken::new()),
        )
        .await
        .expect("single pass should finish on its own");

        assert!(report.all_stopped());
        assert_eq!(report.totals().ops, 7);
    }

    #[tokio::test]
    async fn test_stuck_runner_is_aborted_and_reported() {
        let config = SupervisorConfig {
            shutdown_timeout: Duration::from_millis(50),
            ..fast_config()
        };
        let mut supervisor: Supervisor<()> = Supervisor::new(config);
        supervisor.add(Box::new(StuckWorkload::new(WorkloadKind::Pipeline)));
        supervisor.add(Box::new(TickWorkload::new(
            WorkloadKind::Kv,
            Duration::from_millis(5),
        )));

        let shutdown = CancellationToken::new();
        cancel_after(&shutdown, Duration::from_millis(30));
        let report = supervisor.run((), shutdown).await;

        let unstopped: Vec<WorkloadKind> = report.unstopped().map(|r| r.kind).collect();
        assert_eq!(unstopped, vec![WorkloadKind::Pipeline]);
        assert_eq!(
            report.runner(WorkloadKind::Pipeline).unwrap().exit,
            RunnerExit::Aborted
        );
        assert_eq!(
            report.runner(WorkloadKind::Kv).unwrap().exit,
            RunnerExit::Stopped
        );
    }

    #[tokio::test]
    async fn test_panicking_runner_is_reported() {
        let mut supervisor: Supervisor<()> = Supervisor::new(fast_config());
        supervisor.add(Box::new(PanickingWorkload::new(WorkloadKind::List)));
        supervisor.add(Box::new(TickWorkload::new(
            WorkloadKind::Delete,
            Duration::from_millis(5),
        )));

        let shutdown = CancellationToken::new();
        cancel_after(&shutdown, Duration::from_millis(80));
        let report = supervisor.run((), shutdown).await;

        assert_eq!(
            report.runner(WorkloadKind::List).unwrap().exit,
            RunnerExit::Panicked
        );
        assert_eq!(
            report.runner(WorkloadKind::Delete).unwrap().exit,
            RunnerExit::Stopped
        );
    }

    #[tokio::test]
    async fn test_empty_supervisor_returns_immediately() {
        let supervisor: Supervisor<()> = Supervisor::new(fast_config());
        assert!(supervisor.is_empty());
        let report = supervisor.run((), CancellationToken::new()).await;
        assert!(report.runners.is_empty());
    }
}
