//! PUBLISH of sequenced events.

use crate::error::WorkloadError;
use crate::keys::events_channel;
use crate::kind::WorkloadKind;
use crate::workload::{Workload, WorkloadContext};
use async_trait::async_trait;
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use std::time::Duration;

pub const PUBSUB_INTERVAL: Duration = Duration::from_millis(200);

/// Publishes `event-0`, `event-1`, ... to `<prefix>:events`.
///
/// The sequence only advances after a successful publish and is kept across
/// runner restarts.
pub struct PubSubWorkload {
    channel: String,
    sequence: u64,
}

impl PubSubWorkload {
    pub fn new(ctx: &WorkloadContext) -> Self {
        Self {
            channel: events_channel(&ctx.key_prefix),
            sequence: 0,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Sequence number of the next event.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn next_message(&self) -> String {
        format!("event-{}", self.sequence)
    }
}

#[async_trait]
impl<C> Workload<C> for PubSubWorkload
where
    C: ConnectionLike + Send + Sync,
{
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Pubsub
    }

    fn interval(&self) -> Duration {
        PUBSUB_INTERVAL
    }

    async fn step(&mut self, conn: &mut C) -> Result<(), WorkloadError> {
        let message = self.next_message();
        let _: usize = conn
            .publish(&self.channel, &message)
            .await
            .map_err(WorkloadError::command(WorkloadKind::Pubsub, "PUBLISH"))?;
        self.sequence += 1;
        Ok(())
    }
}
