//! Tests for Driver
//!
//! These tests verify:
//! - Banner and progress output format
//! - Stopping after N iterations
//! - Stopping on an external shutdown signal
//! - Every strategy combination keeps the full population
//! - An output failure ends the run with an error
//! - Invalid configuration is rejected

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use snapbench::driver::PROGRESS_HEADER;
use snapbench::{BenchError, Codec, Config, Driver, MutationStrategy, Shutdown, SnapshotStrategy};

// =============================================================================
// Helper Functions
// =============================================================================

fn small_config(snapshot: SnapshotStrategy, mutation: MutationStrategy) -> Config {
    Config::builder()
        .snapshot(snapshot)
        .mutation(mutation)
        .population(100)
        .mutation_delay(Duration::from_micros(50))
        .max_iterations(25)
        .build()
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_banner_and_progress_lines() {
    let config = small_config(SnapshotStrategy::View, MutationStrategy::WholeRecord);
    let driver = Driver::new(config).unwrap();

    let mut out = Vec::new();
    let report = driver.run(&Shutdown::new(), &mut out).unwrap();
    assert_eq!(report.iterations, 25);

    let text = String::from_utf8(out).unwrap();
    let banner = format!(
        "Replacing entire struct\nUsing shallow map copy\n{}\n",
        PROGRESS_HEADER
    );
    assert!(text.starts_with(&banner));

    let progress: Vec<&str> = text[banner.len()..].split_terminator('\r').collect();
    assert_eq!(progress.len(), 25);
    for (i, line) in progress.iter().enumerate() {
        assert_eq!(*line, format!("{:10} {:5}", i + 1, 100));
    }
}

#[test]
fn test_banner_for_deep_copy_and_name_update() {
    let config = small_config(SnapshotStrategy::Copy, MutationStrategy::FieldLevel);
    let driver = Driver::new(config).unwrap();

    let mut out = Vec::new();
    driver.run(&Shutdown::new(), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Replacing name within struct\nUsing deep map copy\n"));
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_report_counts() {
    let config = Config::builder()
        .population(200)
        .codec(Codec::Bincode)
        .max_iterations(40)
        .build();
    let driver = Driver::new(config).unwrap();

    let report = driver.run(&Shutdown::new(), &mut io::sink()).unwrap();

    assert_eq!(report.iterations, 40);
    assert_eq!(report.last_snapshot_size, 200);
    assert_eq!(report.size_mismatches, 0);
    assert_eq!(report.torn_reads, 0);
    assert!(report.bytes_encoded > 0);
    assert!(report.throughput() > 0.0);
}

#[test]
fn test_external_shutdown_stops_unbounded_run() {
    let config = Config::builder().population(500).build();
    let driver = Driver::new(config).unwrap();

    let shutdown = Arc::new(Shutdown::new());
    let trigger = {
        let shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            shutdown.trigger();
        })
    };

    let report = driver.run(&shutdown, &mut io::sink()).unwrap();
    trigger.join().unwrap();

    assert!(report.iterations > 0);
    assert_eq!(report.last_snapshot_size, 500);
    assert_eq!(report.size_mismatches, 0);
}

#[test]
fn test_already_cancelled_runs_no_iterations() {
    let driver = Driver::new(Config::builder().population(10).build()).unwrap();

    let shutdown = Shutdown::new();
    shutdown.trigger();

    let report = driver.run(&shutdown, &mut io::sink()).unwrap();
    assert_eq!(report.iterations, 0);
}

#[test]
fn test_all_strategy_combinations_keep_population() {
    for snapshot in [SnapshotStrategy::View, SnapshotStrategy::Copy] {
        for mutation in [MutationStrategy::WholeRecord, MutationStrategy::FieldLevel] {
            let driver = Driver::new(small_config(snapshot, mutation)).unwrap();
            let store = driver.store();

            let report = driver.run(&Shutdown::new(), &mut io::sink()).unwrap();

            assert_eq!(report.size_mismatches, 0, "{:?}/{:?}", snapshot, mutation);
            if mutation.is_race_free() {
                assert_eq!(report.torn_reads, 0, "{:?}/{:?}", snapshot, mutation);
            }
            assert_eq!(report.last_snapshot_size, 100);
            assert_eq!(store.snapshot_copy().len(), 100);
        }
    }
}

#[test]
fn test_same_seed_same_initial_store() {
    let a = Driver::new(Config::builder().population(300).seed(9).build()).unwrap();
    let b = Driver::new(Config::builder().population(300).seed(9).build()).unwrap();

    let first = a.store().snapshot_copy();
    let second = b.store().snapshot_copy();
    for (id, record) in &first {
        assert_eq!(record.name(), second[id].name());
    }
}

// =============================================================================
// Fatal Path Tests
// =============================================================================

/// Writer that accepts `remaining` writes, then fails like a closed pipe
struct FailingWriter {
    remaining: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
        }
        self.remaining -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_output_failure_ends_run_and_stops_mutator() {
    // Unbounded run: only the write failure can end it
    let config = Config::builder()
        .snapshot(SnapshotStrategy::Copy)
        .mutation(MutationStrategy::FieldLevel)
        .population(100)
        .build();
    let driver = Driver::new(config).unwrap();

    // Enough writes for the banner, then fail inside the read loop
    let mut out = FailingWriter { remaining: 20 };
    let start = Instant::now();
    let result = driver.run(&Shutdown::new(), &mut out);

    match result {
        Err(BenchError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected Io error, got {:?}", other.map(|r| r.iterations)),
    }

    // Returning at all means the mutator was stopped and joined
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_output_failure_during_banner() {
    let driver = Driver::new(Config::builder().population(10).build()).unwrap();

    let mut out = FailingWriter { remaining: 0 };
    let result = driver.run(&Shutdown::new(), &mut out);
    assert!(matches!(result, Err(BenchError::Io(_))));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_zero_population_rejected() {
    let result = Driver::new(Config::builder().population(0).build());
    assert!(matches!(result, Err(BenchError::Config(_))));
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.population, 10_000);
    assert_eq!(config.seed, 0);
    assert_eq!(config.snapshot, SnapshotStrategy::View);
    assert_eq!(config.mutation, MutationStrategy::WholeRecord);
    assert_eq!(config.mutation_delay, Duration::from_millis(1));
    assert_eq!(config.codec, Codec::Json);
    assert!(config.max_iterations.is_none());
}
