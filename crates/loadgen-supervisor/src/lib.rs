//! Runs redis-loadgen workloads concurrently against one shared connection.
//!
//! The [`Supervisor`] spawns one task per workload. Each task loops over
//! [`loadgen_workload::Workload::step`], sleeping the workload's interval in
//! between, until the shutdown token is cancelled. A failed iteration is
//! logged and the runner restarts after an exponential backoff; the other
//! runners keep going.
//!
//! ```text
//!            shutdown token (Ctrl+C / SIGTERM / --duration)
//!                      │
//!                      ▼
//! ┌───────────────────────────────────────┐
//! │ Supervisor                            │
//! │  - heartbeat every 5s                 │
//! │  - bounded join on shutdown           │
//! └──┬──────┬──────┬──────┬──────┬──────┬─┘
//!    ▼      ▼      ▼      ▼      ▼      ▼
//!   kv  counter  hash   list  pubsub  ... (one task each, shared handle)
//! ```

pub mod config;
pub mod report;
mod runner;
pub mod shutdown;
pub mod supervisor;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::{Backoff, SupervisorConfig};
pub use report::{RunnerExit, RunnerReport, SupervisorReport};
pub use shutdown::{shutdown_after, shutdown_on_signal};
pub use supervisor::Supervisor;
