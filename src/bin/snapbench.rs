//! snapbench Binary
//!
//! Runs the snapshot benchmark until the process is killed.

use std::io;

use clap::Parser;
use snapbench::{Config, Driver, MutationStrategy, Shutdown, SnapshotStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// Snapshot vs mutation strategy benchmark
#[derive(Parser, Debug)]
#[command(name = "snapbench")]
#[command(about = "Serialize snapshots of a store while a background thread mutates it")]
#[command(version)]
struct Args {
    /// Use a copy of the map instead of the live map
    #[arg(long)]
    deep: bool,

    /// Only update the name inside each record instead of replacing it
    #[arg(long)]
    name: bool,
}

fn main() {
    // Logs go to stderr; stdout carries the progress line
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snapbench=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("snapbench v{}", snapbench::VERSION);

    let config = Config::builder()
        .snapshot(if args.deep {
            SnapshotStrategy::Copy
        } else {
            SnapshotStrategy::View
        })
        .mutation(if args.name {
            MutationStrategy::FieldLevel
        } else {
            MutationStrategy::WholeRecord
        })
        .build();

    let driver = match Driver::new(config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to set up benchmark: {}", e);
            std::process::exit(1);
        }
    };

    // Never triggered: the run ends when the process is killed
    let shutdown = Shutdown::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = driver.run(&shutdown, &mut out) {
        tracing::error!("Benchmark aborted: {}", e);
        std::process::exit(1);
    }
}
