//! Configuration for snapbench
//!
//! Centralized configuration with sensible defaults. Read once at
//! startup and never changed during a run.

use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::mutation::MutationStrategy;
use crate::snapshot::{Codec, SnapshotStrategy};

/// Main configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Strategy Selection
    // -------------------------------------------------------------------------
    /// How the reader obtains its snapshot (view or copy)
    pub snapshot: SnapshotStrategy,

    /// How the background loop changes records (replace or field update)
    pub mutation: MutationStrategy,

    // -------------------------------------------------------------------------
    // Population
    // -------------------------------------------------------------------------
    /// Number of records, ids are `0..population`
    pub population: usize,

    /// Seed for the name generator (initial names and mutations)
    pub seed: u64,

    // -------------------------------------------------------------------------
    // Loop Tuning
    // -------------------------------------------------------------------------
    /// Pause between two mutations
    pub mutation_delay: Duration,

    /// Encoding used by the serialization loop
    pub codec: Codec,

    /// Stop the read loop after this many iterations (None = until cancelled)
    pub max_iterations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: SnapshotStrategy::View,
            mutation: MutationStrategy::WholeRecord,
            population: 10_000,
            seed: 0,
            mutation_delay: Duration::from_millis(1),
            codec: Codec::Json,
            max_iterations: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject configurations the driver cannot run
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(BenchError::Config(
                "population must contain at least one record".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the snapshot strategy
    pub fn snapshot(mut self, strategy: SnapshotStrategy) -> Self {
        self.config.snapshot = strategy;
        self
    }

    /// Set the mutation strategy
    pub fn mutation(mut self, strategy: MutationStrategy) -> Self {
        self.config.mutation = strategy;
        self
    }

    /// Set the number of records
    pub fn population(mut self, count: usize) -> Self {
        self.config.population = count;
        self
    }

    /// Set the name generator seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the pause between mutations
    pub fn mutation_delay(mut self, delay: Duration) -> Self {
        self.config.mutation_delay = delay;
        self
    }

    /// Set the snapshot encoding
    pub fn codec(mut self, codec: Codec) -> Self {
        self.config.codec = codec;
        self
    }

    /// Stop after a fixed number of read iterations
    pub fn max_iterations(mut self, count: u64) -> Self {
        self.config.max_iterations = Some(count);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
