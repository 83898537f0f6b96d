//! Workload runners for the redis-loadgen load generator.
//!
//! Each workload models one Redis access pattern and performs a small, fixed
//! sequence of commands per iteration:
//!
//! ```text
//! ┌──────────┬──────────────────────────────┬─────────────────┐
//! │ kv       │ SET key value EX ttl; GET    │ demo:kv:1..1000 │
//! │ counter  │ INCR                         │ demo:counter:.. │
//! │ hash     │ HSET views/likes/updated_at; │ demo:hash:..    │
//! │          │ HGETALL                      │                 │
//! │ list     │ LPUSH; RPOP                  │ demo:list:..    │
//! │ pubsub   │ PUBLISH event-<n>            │ demo:events     │
//! │ delete   │ DEL (kv key space)           │ demo:kv:1..1000 │
//! │ pipeline │ MULTI; 20 x SET; EXEC        │ demo:pipe:0..19 │
//! └──────────┴──────────────────────────────┴─────────────────┘
//! ```
//!
//! Workloads do not loop or sleep themselves. A runner (see the
//! `loadgen-supervisor` crate) calls [`Workload::step`] repeatedly and waits
//! [`Workload::interval`] in between.
//!
//! # Example
//!
//! ```rust,ignore
//! use loadgen_workload::{WorkloadContext, WorkloadKind};
//!
//! let ctx = WorkloadContext::new("demo", Duration::from_millis(50), 42);
//! let mut workload = WorkloadKind::Kv.build::<ConnectionManager>(&ctx);
//! workload.step(&mut conn).await?;
//! tokio::time::sleep(workload.interval()).await;
//! ```

pub mod error;
pub mod keys;
pub mod kind;
pub mod stats;
pub mod values;
pub mod workload;
pub mod workloads;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use error::WorkloadError;
pub use keys::KeySpace;
pub use kind::WorkloadKind;
pub use stats::{StatsSnapshot, WorkloadStats};
pub use workload::{Workload, WorkloadContext};
