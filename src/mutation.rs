//! Mutation Module
//!
//! The background writer that keeps the store changing while snapshots
//! are taken.
//!
//! ## Strategies
//! - `WholeRecord`: build a new record and swap it into the slot under
//!   the write guard. Readers holding the old record are unaffected.
//! - `FieldLevel`: fetch the current record under the write guard,
//!   release it, then overwrite the name in place. Any reader walking the
//!   same record can observe a half-written name.
//!
//! Each iteration first waits `delay` (or returns if cancelled), then
//! draws a target id and a new name from the generator, in that order.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::names::NameGenerator;
use crate::shutdown::ShutdownListener;
use crate::store::{Record, Store};

/// How the background loop changes records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStrategy {
    /// Replace the whole record
    WholeRecord,

    /// Overwrite the name of the existing record, unguarded
    FieldLevel,
}

impl MutationStrategy {
    /// Apply one mutation to a random id; returns the id touched
    pub fn apply(self, store: &Store, generator: &mut NameGenerator) -> Result<u64> {
        let id = generator.next_id(store.population())?;
        let name = generator.next_name();

        match self {
            MutationStrategy::WholeRecord => store.replace(id, Record::new(id, &name)?)?,
            MutationStrategy::FieldLevel => store.mutate_name(id, &name)?,
        }

        Ok(id)
    }

    /// Startup banner line
    pub fn banner(self) -> &'static str {
        match self {
            MutationStrategy::WholeRecord => "Replacing entire struct",
            MutationStrategy::FieldLevel => "Replacing name within struct",
        }
    }

    /// Whether readers can ever observe a torn name under this strategy
    pub fn is_race_free(self) -> bool {
        matches!(self, MutationStrategy::WholeRecord)
    }
}

/// Continuous mutation loop
pub struct MutationLoop {
    store: Arc<Store>,
    strategy: MutationStrategy,
    generator: NameGenerator,
    delay: Duration,
}

impl MutationLoop {
    pub fn new(
        store: Arc<Store>,
        strategy: MutationStrategy,
        generator: NameGenerator,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            strategy,
            generator,
            delay,
        }
    }

    /// Mutate until `shutdown` fires; returns the number of mutations applied
    pub fn run(mut self, shutdown: ShutdownListener) -> Result<u64> {
        tracing::debug!(strategy = ?self.strategy, delay = ?self.delay, "Mutation loop started");

        let mut applied = 0u64;
        while !shutdown.wait(self.delay) {
            self.strategy.apply(&self.store, &mut self.generator)?;
            applied += 1;
        }

        tracing::debug!(applied, "Mutation loop stopped");
        Ok(applied)
    }
}
