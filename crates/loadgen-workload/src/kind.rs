//! The set of workload variants.

use crate::workload::{Workload, WorkloadContext};
use crate::workloads::{
    CounterWorkload, DeleteWorkload, HashWorkload, KvWorkload, ListWorkload, PipelineWorkload,
    PubSubWorkload,
};
use clap::ValueEnum;
use redis::aio::ConnectionLike;

/// Workload variant, also the tag used in generated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WorkloadKind {
    Kv,
    Counter,
    Hash,
    List,
    Pubsub,
    Delete,
    Pipeline,
}

impl WorkloadKind {
    /// Every variant, in start-up order.
    pub const ALL: [WorkloadKind; 7] = [
        WorkloadKind::Kv,
        WorkloadKind::Counter,
        WorkloadKind::Hash,
        WorkloadKind::List,
        WorkloadKind::Pubsub,
        WorkloadKind::Delete,
        WorkloadKind::Pipeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Kv => "kv",
            WorkloadKind::Counter => "counter",
            WorkloadKind::Hash => "hash",
            WorkloadKind::List => "list",
            WorkloadKind::Pubsub => "pubsub",
            WorkloadKind::Delete => "delete",
            WorkloadKind::Pipeline => "pipeline",
        }
    }

    /// Position in [`WorkloadKind::ALL`], used to derive per-workload seeds.
    pub fn index(&self) -> usize {
        WorkloadKind::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default()
    }

    /// Construct the workload for this variant.
    pub fn build<C>(self, ctx: &WorkloadContext) -> Box<dyn Workload<C>>
    where
        C: ConnectionLike + Send + Sync + 'static,
    {
        match self {
            WorkloadKind::Kv => Box::new(KvWorkload::new(ctx)),
            WorkloadKind::Counter => Box::new(CounterWorkload::new(ctx)),
            WorkloadKind::Hash => Box::new(HashWorkload::new(ctx)),
            WorkloadKind::List => Box::new(ListWorkload::new(ctx)),
            WorkloadKind::Pubsub => Box::new(PubSubWorkload::new(ctx)),
            WorkloadKind::Delete => Box::new(DeleteWorkload::new(ctx)),
            WorkloadKind::Pipeline => Box::new(PipelineWorkload::new(ctx)),
        }
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
