//! Command-line interface for redis-loadgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Everything against localhost:6379 until Ctrl+C
//! redis-loadgen
//!
//! # Environment-style configuration
//! REDIS_HOST=redis REDIS_DB=1 LOADGEN_DELAY=10ms redis-loadgen
//!
//! # A fixed-length run with a reproducible key/value sequence
//! redis-loadgen --duration 5m --seed 42 --key-prefix bench
//! ```

use clap::Parser;
use loadgen_supervisor::{shutdown_after, shutdown_on_signal};
use rand::Rng;
use redis_loadgen::connect::connect_to_redis;
use redis_loadgen::logging::init_logging;
use redis_loadgen::{build_supervisor, LoadOpts, RedisOpts};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "redis-loadgen")]
#[command(about = "Generate a realistic mix of Redis traffic for observability testing")]
#[command(long_about = None)]
struct Cli {
    /// Redis connection options
    #[command(flatten)]
    redis: RedisOpts,

    /// Load shape options
    #[command(flatten)]
    load: LoadOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    tracing::info!("Starting Redis load generator");
    tracing::info!("Redis: {}", cli.redis.describe());

    // Ctrl+C must also work while the initial connection is still retrying.
    let shutdown = CancellationToken::new();
    shutdown_on_signal(shutdown.clone());

    let conn = tokio::select! {
        conn = connect_to_redis(&cli.redis) => conn?,
        _ = shutdown.cancelled() => {
            tracing::info!("Stopping load generator");
            return Ok(());
        }
    };

    let seed = cli.load.seed.unwrap_or_else(|| rand::rng().random());
    tracing::debug!("Using seed {seed}");

    let supervisor = build_supervisor(&cli.load, seed);

    if let Some(duration) = cli.load.duration {
        shutdown_after(duration, shutdown.clone());
    }

    let report = supervisor.run(conn, shutdown).await;
    report.log_summary();

    tracing::info!("Load generator stopped");
    Ok(())
}
