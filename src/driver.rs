//! Driver Module
//!
//! Runs one benchmark: a background mutation loop and a foreground
//! snapshot + serialize loop against the same store.
//!
//! ## Responsibilities
//! - Populate the store from the configured seed
//! - Start the mutation loop on its own thread
//! - Snapshot, encode and report progress until cancelled
//! - Stop the mutation loop and summarize throughput

use std::io::Write;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::mutation::MutationLoop;
use crate::names::NameGenerator;
use crate::shutdown::{Shutdown, ShutdownListener};
use crate::store::Store;

/// Column header printed under the banner
pub const PROGRESS_HEADER: &str = "  Count     Size\n----------  -----";

/// Summary of a finished run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Read-loop iterations completed
    pub iterations: u64,

    /// Mutations applied by the background loop
    pub mutations: u64,

    /// Names observed mid-write, summed over all iterations
    pub torn_reads: u64,

    /// Size of the last snapshot taken
    pub last_snapshot_size: usize,

    /// Iterations whose snapshot size differed from the population
    pub size_mismatches: u64,

    /// Total encoded bytes
    pub bytes_encoded: u64,

    /// Wall time of the read loop
    pub elapsed: Duration,
}

impl RunReport {
    /// Read-loop iterations per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }
}

/// One configured benchmark, ready to run
pub struct Driver {
    config: Config,
    store: Arc<Store>,
    generator: NameGenerator,
}

impl Driver {
    /// Validate `config` and populate the store
    ///
    /// The generator that named the initial records is kept and later
    /// handed to the mutation loop, so a seed fixes the whole run.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut generator = NameGenerator::new(config.seed);
        let store = Arc::new(Store::populate(config.population, &mut generator)?);

        Ok(Self {
            config,
            store,
            generator,
        })
    }

    /// The store this driver runs against
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Run until `shutdown` fires or `max_iterations` is reached
    ///
    /// Writes the banner and one `\r`-terminated progress line per
    /// iteration to `out`. An encoding failure, or a failure inside the
    /// mutation loop, ends the run with an error.
    pub fn run<W: Write>(self, shutdown: &Shutdown, out: &mut W) -> Result<RunReport> {
        let Driver {
            config,
            store,
            generator,
        } = self;

        writeln!(out, "{}", config.mutation.banner())?;
        writeln!(out, "{}", config.snapshot.banner())?;
        writeln!(out, "{}", PROGRESS_HEADER)?;

        if !config.mutation.is_race_free() {
            tracing::warn!(
                mutation = ?config.mutation,
                "Names are written without a lock; torn reads are expected"
            );
        }

        let mutator_stop = Shutdown::new();
        let mutator = MutationLoop::new(
            Arc::clone(&store),
            config.mutation,
            generator,
            config.mutation_delay,
        );
        let mutator_signal = mutator_stop.listener();
        let handle = thread::Builder::new()
            .name("mutator".to_string())
            .spawn(move || mutator.run(mutator_signal))?;

        let read = read_loop(&config, &store, shutdown.listener(), &handle, out);

        mutator_stop.trigger();
        let mutated = handle
            .join()
            .map_err(|_| BenchError::MutatorPanicked("mutation thread panicked".to_string()))?;

        let mut report = read?;
        report.mutations = mutated?;

        tracing::info!(
            iterations = report.iterations,
            mutations = report.mutations,
            torn_reads = report.torn_reads,
            bytes = report.bytes_encoded,
            per_sec = report.throughput(),
            "Run finished"
        );

        Ok(report)
    }
}

/// Snapshot + encode loop, on the calling thread
fn read_loop<W: Write>(
    config: &Config,
    store: &Store,
    shutdown: ShutdownListener,
    mutator: &JoinHandle<Result<u64>>,
    out: &mut W,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    let start = Instant::now();

    tracing::debug!(snapshot = ?config.snapshot, codec = ?config.codec, "Read loop started");

    while !shutdown.is_cancelled() {
        if config.max_iterations.is_some_and(|max| report.iterations >= max) {
            break;
        }
        // Mutator only exits early on error; the join reports it
        if mutator.is_finished() {
            break;
        }

        let snapshot = config.snapshot.take(store);
        let encoded = snapshot.encode(config.codec).map_err(|e| {
            tracing::error!(iteration = report.iterations + 1, "Snapshot encoding failed: {}", e);
            e
        })?;

        report.iterations += 1;
        report.torn_reads += encoded.torn_reads as u64;
        report.bytes_encoded += encoded.bytes.len() as u64;
        report.last_snapshot_size = snapshot.len();
        if snapshot.len() != store.population() {
            report.size_mismatches += 1;
        }

        write!(out, "{:10} {:5}\r", report.iterations, snapshot.len())?;
        out.flush()?;
    }

    report.elapsed = start.elapsed();
    Ok(report)
}
