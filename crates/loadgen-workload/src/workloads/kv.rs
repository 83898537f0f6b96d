//! SET with expiry followed by GET.

use crate::error::WorkloadError;
use crate::keys::KV_KEYS;
use crate::kind::WorkloadKind;
use crate::values::{random_alphanumeric, random_ttl, KV_VALUE_LEN};
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use rand::rngs::StdRng;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::time::Duration;

/// Writes a random value with a 10-120s TTL and reads it straight back.
pub struct KvWorkload {
    prefix: String,
    interval: Duration,
    rng: StdRng,
}

impl KvWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            interval: ctx.delay,
            rng: ctx.rng_for(WorkloadKind::Kv),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for KvWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Kv
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let key = KV_KEYS.random_key(&self.prefix, &mut self.rng);
        let value = random_alphanumeric(&mut self.rng, KV_VALUE_LEN);
        let ttl = random_ttl(&mut self.rng);

        let _: () = conn
            .set_ex(&key, &value, ttl)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Kv, "SET"))?;
        let _: Option<String> = conn
            .get(&key)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Kv, "GET"))?;

        Ok(())
    }
}
