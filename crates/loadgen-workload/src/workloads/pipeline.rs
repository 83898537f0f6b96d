//! Bursts of 20 SETs in one MULTI/EXEC round trip.

use crate::error::WorkloadError;
use crate::keys::PIPELINE_KEYS;
use crate::kind::WorkloadKind;
use crate::values::{random_alphanumeric, PIPELINE_VALUE_LEN};
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use redis::aio::ConnectionLike;
use std::time::Duration;

pub const PIPELINE_INTERVAL: Duration = Duration::from_secs(1);

/// Build one transactional batch writing every key in [`PIPELINE_KEYS`].
pub fn build_pipeline<R: Rng>(prefix: &str, rng: &mut R) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for key in PIPELINE_KEYS.keys(prefix) {
        pipe.set(key, random_alphanumeric(rng, PIPELINE_VALUE_LEN))
            .ignore();
    }
    pipe
}

/// Sends a batch once per second; the burst shows up as a periodic latency spike.
pub struct PipelineWorkload {
    prefix: String,
    rng: StdRng,
}

impl PipelineWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            rng: ctx.rng_for(WorkloadKind::Pipeline),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for PipelineWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Pipeline
    }

    fn interval(&self) -> Duration {
        PIPELINE_INTERVAL
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let pipe = build_pipeline(&self.prefix, &mut self.rng);
        // A failed batch surfaces as a single error for the whole transaction.
        let _: () = pipe
            .query_async(conn)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Pipeline, "EXEC"))?;
        Ok(())
    }
}
