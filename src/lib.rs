//! redis-loadgen
//!
//! A synthetic workload generator for Redis. It runs seven independent
//! workloads (TTL writes and reads, counters, hash records, list push/pop,
//! pub/sub events, deletes, and transactional pipelines) against one shared
//! connection to produce realistic load and latency patterns for
//! observability testing.
//!
//! # CLI Usage
//!
//! ```bash
//! # Run everything against a local Redis until Ctrl+C
//! redis-loadgen
//!
//! # Remote server, only the write-heavy workloads, for ten minutes
//! REDIS_PASSWORD=secret redis-loadgen \
//!   --redis-host redis.internal --redis-db 2 \
//!   --workloads kv,pipeline --duration 10m
//!
//! # One iteration of every workload (smoke test)
//! redis-loadgen --run-forever=false
//! ```

use clap::Args;
use loadgen_supervisor::{Supervisor, SupervisorConfig};
use loadgen_workload::{WorkloadContext, WorkloadKind};
use redis::aio::ConnectionManager;
use std::time::Duration;

pub mod config;
pub mod connect;
pub mod logging;

use config::parse_duration;

/// Redis connection options.
#[derive(Args, Clone, Debug)]
pub struct RedisOpts {
    /// Redis host
    #[arg(long, env = "REDIS_HOST", default_value = "localhost")]
    pub redis_host: String,

    /// Redis port
    #[arg(long, env = "REDIS_PORT", default_value = "6379")]
    pub redis_port: u16,

    /// Redis database index
    #[arg(long, env = "REDIS_DB", default_value = "0")]
    pub redis_db: i64,

    /// Redis ACL username (requires a password)
    #[arg(long, env = "REDIS_USERNAME")]
    pub redis_username: Option<String>,

    /// Redis password
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,
}

impl RedisOpts {
    /// `host:port db=N`, for log lines.
    pub fn describe(&self) -> String {
        format!(
            "{}:{} db={}",
            self.redis_host, self.redis_port, self.redis_db
        )
    }
}

/// Load shape options.
#[derive(Args, Clone, Debug)]
pub struct LoadOpts {
    /// Pause between iterations of the kv, counter, hash and list workloads (lower = more load)
    #[arg(long, env = "LOADGEN_DELAY", default_value = "50ms", value_parser = parse_duration)]
    pub delay: Duration,

    /// Namespace prepended to every key and channel
    #[arg(long, env = "LOADGEN_KEY_PREFIX", default_value = "demo")]
    pub key_prefix: String,

    /// Keep running until interrupted; when false every workload runs once
    #[arg(
        long,
        env = "LOADGEN_RUN_FOREVER",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub run_forever: bool,

    /// Workloads to run (comma-separated, empty = all)
    #[arg(long, env = "LOADGEN_WORKLOADS", value_enum, value_delimiter = ',')]
    pub workloads: Vec<WorkloadKind>,

    /// Stop after this long (e.g. "30s", "10m"); runs until interrupted if unset
    #[arg(long, env = "LOADGEN_DURATION", value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Random seed for key and value generation (random if unset)
    #[arg(long, env = "LOADGEN_SEED")]
    pub seed: Option<u64>,

    /// How often to log a heartbeat line
    #[arg(long, env = "LOADGEN_HEARTBEAT_INTERVAL", default_value = "5s", value_parser = parse_duration)]
    pub heartbeat_interval: Duration,

    /// How long to wait for workloads to stop on shutdown before aborting them
    #[arg(long, env = "LOADGEN_SHUTDOWN_TIMEOUT", default_value = "10s", value_parser = parse_duration)]
    pub shutdown_timeout: Duration,
}

impl LoadOpts {
    /// Selected workloads in start-up order, without duplicates.
    pub fn selected_workloads(&self) -> Vec<WorkloadKind> {
        if self.workloads.is_empty() {
            return WorkloadKind::ALL.to_vec();
        }
        WorkloadKind::ALL
            .into_iter()
            .filter(|k| self.workloads.contains(k))
            .collect()
    }

    pub fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig {
            heartbeat_interval: self.heartbeat_interval,
            shutdown_timeout: self.shutdown_timeout,
            run_forever: self.run_forever,
            ..SupervisorConfig::default()
        }
    }

    pub fn workload_context(&self, seed: u64) -> WorkloadContext {
        WorkloadContext::new(self.key_prefix.clone(), self.delay, seed)
    }
}

/// Build a supervisor running every selected workload.
pub fn build_supervisor(load: &LoadOpts, seed: u64) -> Supervisor<ConnectionManager> {
    let ctx = load.workload_context(seed);
    let mut supervisor = Supervisor::new(load.supervisor_config());
    for kind in load.selected_workloads() {
        supervisor.add(kind.build(&ctx));
    }
    supervisor
}
