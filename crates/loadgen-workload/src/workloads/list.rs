//! LPUSH followed by RPOP, queue-style.

use crate::error::WorkloadError;
use crate::keys::LIST_KEYS;
use crate::kind::WorkloadKind;
use crate::values::{random_alphanumeric, LIST_VALUE_LEN};
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use rand::rngs::StdRng;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::time::Duration;

pub struct ListWorkload {
    prefix: String,
    interval: Duration,
    rng: StdRng,
}

impl ListWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            interval: ctx.delay,
            rng: ctx.rng_for(WorkloadKind::List),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for ListWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::List
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let key = LIST_KEYS.random_key(&self.prefix, &mut self.rng);
        let value = random_alphanumeric(&mut self.rng, LIST_VALUE_LEN);

        let _: usize = conn
            .lpush(&key, &value)
            .await
            .map_err(WorkloadError::command(WorkloadKind::List, "LPUSH"))?;
        let _: Option<String> = conn
            .rpop(&key, None)
            .await
            .map_err(WorkloadError::command(WorkloadKind::List, "RPOP"))?;

        Ok(())
    }
}
