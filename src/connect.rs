use crate::RedisOpts;
use anyhow::Context;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;

/// Per-attempt TCP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
/// Reconnect attempts after the first failure.
const CONNECT_RETRIES: usize = 2;
/// Upper bound on the reconnect delay, in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 500;
/// Hard limit on the whole startup handshake, retries included.
pub const CONNECT_BUDGET: Duration = Duration::from_secs(10);

fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_number_of_retries(CONNECT_RETRIES)
        .set_max_delay(MAX_RETRY_DELAY_MS)
        .set_connection_timeout(CONNECT_TIMEOUT)
}

/// Connection settings for the configured Redis server.
pub fn connection_info(opts: &RedisOpts) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(opts.redis_host.clone(), opts.redis_port),
        redis: RedisConnectionInfo {
            db: opts.redis_db,
            username: opts.redis_username.clone(),
            password: opts.redis_password.clone(),
            ..RedisConnectionInfo::default()
        },
    }
}

// Connect to the Redis instance shared by all workloads
pub async fn connect_to_redis(opts: &RedisOpts) -> anyhow::Result<ConnectionManager> {
    let target = opts.describe();
    let client = redis::Client::open(connection_info(opts))
        .with_context(|| format!("Invalid Redis connection settings for {target}"))?;

    let mut conn = tokio::time::timeout(
        CONNECT_BUDGET,
        ConnectionManager::new_with_config(client, manager_config()),
    )
    .await
    .map_err(|_| anyhow::anyhow!("timed out after {CONNECT_BUDGET:?}"))
    .and_then(|connected| connected.map_err(anyhow::Error::from))
    .with_context(|| format!("Failed to connect to Redis at {target}"))?;

    // The manager connects lazily on some errors; make sure AUTH/SELECT really worked.
    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .with_context(|| format!("Redis at {target} did not answer PING"))?;

    Ok(conn)
}
