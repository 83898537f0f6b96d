//! INCR on a small set of counters.

use crate::error::WorkloadError;
use crate::keys::COUNTER_KEYS;
use crate::kind::WorkloadKind;
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use rand::rngs::StdRng;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::time::Duration;

pub struct CounterWorkload {
    prefix: String,
    interval: Duration,
    rng: StdRng,
}

impl CounterWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            interval: ctx.delay,
            rng: ctx.rng_for(WorkloadKind::Counter),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for CounterWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Counter
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let key = COUNTER_KEYS.random_key(&self.prefix, &mut self.rng);
        let _: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Counter, "INCR"))?;
        Ok(())
    }
}
