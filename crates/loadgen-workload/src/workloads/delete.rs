//! DEL on the kv key space, to produce churn and misses.

use crate::error::WorkloadError;
use crate::keys::KV_KEYS;
use crate::kind::WorkloadKind;
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use rand::rngs::StdRng;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::time::Duration;

pub const DELETE_INTERVAL: Duration = Duration::from_millis(300);

pub struct DeleteWorkload {
    prefix: String,
    rng: StdRng,
}

impl DeleteWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            rng: ctx.rng_for(WorkloadKind::Delete),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for DeleteWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Delete
    }

    fn interval(&self) -> Duration {
        DELETE_INTERVAL
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let key = KV_KEYS.random_key(&self.prefix, &mut self.rng);
        // 0 when the key is already gone; not an error.
        let _: usize = conn
            .del(&key)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Delete, "DEL"))?;
        Ok(())
    }
}
