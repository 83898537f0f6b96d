//! Log output: `[<ISO-8601 UTC timestamp>] <message>` on stdout.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

/// Renders event timestamps as `[2024-01-01T00:00:00.000000Z]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedUtc;

impl FormatTime for BracketedUtc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&bracketed_timestamp(Utc::now()))
    }
}

pub fn bracketed_timestamp(at: DateTime<Utc>) -> String {
    format!("[{}]", at.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Initialize tracing. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // Already initialized (e.g. in tests) is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(BracketedUtc)
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .try_init();
}
