//! Error types for workload execution.

use crate::kind::WorkloadKind;
use thiserror::Error;

/// Errors that can occur while running a workload iteration.
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("{workload} workload: {command} failed: {source}")]
    Command {
        workload: WorkloadKind,
        command: &'static str,
        #[source]
        source: redis::RedisError,
    },
}

impl WorkloadError {
    /// Build a `map_err` adapter tagging a Redis error with the workload and command.
    pub fn command(
        workload: WorkloadKind,
        command: &'static str,
    ) -> impl FnOnce(redis::RedisError) -> WorkloadError {
        move |source| WorkloadError::Command {
            workload,
            command,
            source,
        }
    }
}
