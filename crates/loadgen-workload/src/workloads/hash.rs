//! HSET of three fields followed by HGETALL.

use crate::error::WorkloadError;
use crate::keys::HASH_KEYS;
use crate::kind::WorkloadKind;
use crate::values::HashFields;
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::time::Duration;

/// Updates `views`, `likes` and `updated_at` on a record and reads it back.
pub struct HashWorkload {
    prefix: String,
    interval: Duration,
    rng: StdRng,
}

impl HashWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            prefix: ctx.key_prefix.clone(),
            interval: ctx.delay,
            rng: ctx.rng_for(WorkloadKind::Hash),
        }
    }
}

#[async_trait]
impl<C> Workload<C> for HashWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Hash
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let key = HASH_KEYS.random_key(&self.prefix, &mut self.rng);
        let fields = HashFields::random(&mut self.rng, Utc::now()).to_pairs();

        let _: () = conn
            .hset_multiple(&key, &fields)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Hash, "HSET"))?;
        let _: HashMap<String, String> = conn
            .hgetall(&key)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Hash, "HGETALL"))?;

        Ok(())
    }
}
