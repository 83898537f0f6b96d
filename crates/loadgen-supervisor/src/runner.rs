//! The loop driving a single workload.

use crate::config::{Backoff, SupervisorConfig};
use loadgen_workload::{Workload, WorkloadError, WorkloadKind, WorkloadStats};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Run `workload` until `cancel` fires (or once, in single-pass mode).
///
/// Cancellation is checked before each iteration and interrupts the sleep,
/// but never an in-flight command. An error ends the run.
pub(crate) async fn run_loop<C: Send>(
    workload: &mut dyn Workload<C>,
    conn: &mut C,
    cancel: &CancellationToken,
    stats: &WorkloadStats,
    run_forever: bool,
) -> Result<(), WorkloadError> {
    while !cancel.is_cancelled() {
        workload.step(conn).await?;
        stats.record_op();

        if !run_forever {
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(workload.interval()) => {}
        }
    }
    Ok(())
}

/// Run a workload, restarting it after a backoff whenever an iteration fails.
pub(crate) async fn supervise<C: Send>(
    mut workload: Box<dyn Workload<C>>,
    mut conn: C,
    cancel: CancellationToken,
    stats: Arc<WorkloadStats>,
    config: SupervisorConfig,
) -> WorkloadKind {
    let kind = workload.kind();
    let mut backoff = Backoff::new(config.initial_backoff, config.max_backoff);

    debug!("{kind} workload started");

    loop {
        let ops_before = stats.snapshot().ops;
        let result = run_loop(
            workload.as_mut(),
            &mut conn,
            &cancel,
            &stats,
            config.run_forever,
        )
        .await;

        let Err(e) = result else {
            break;
        };
        stats.record_error();

        if !config.run_forever {
            error!("{e}");
            break;
        }

        if stats.snapshot().ops > ops_before {
            backoff.reset();
        }
        let delay = backoff.next_delay();
        error!("{e}; restarting in {delay:?}");

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
        stats.record_restart();
        info!("Restarting {kind} workload");
    }

    debug!("{kind} workload stopped");
    kind
}
