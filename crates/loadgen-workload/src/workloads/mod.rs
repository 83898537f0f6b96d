//! One module per workload variant.

mod counter;
mod delete;
mod hash;
mod kv;
mod list;
mod pipeline;
mod pubsub;

pub use counter::CounterWorkload;
pub use delete::DeleteWorkload;
pub use hash::HashWorkload;
pub use kv::KvWorkload;
pub use list::ListWorkload;
pub use pipeline::{build_pipeline, PipelineWorkload};
pub use pubsub::PubSubWorkload;
