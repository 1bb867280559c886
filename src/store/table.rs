//! Store implementation
//!
//! Fixed key set of atomically swappable record slots behind an RwLock.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::RwLock;

use crate::error::{BenchError, Result};
use crate::names::NameGenerator;

use super::Record;

/// The live id → record mapping
///
/// Keys are fixed when the store is populated. Each slot can be
/// repointed at a new record, but only by [`Store::replace`] while the
/// write guard is held. Holding an `Arc<Mapping>` outside the guard is
/// allowed and is exactly the view hazard: slots keep changing under the
/// holder.
pub struct Mapping {
    slots: BTreeMap<u64, ArcSwap<Record>>,
}

impl Mapping {
    /// Number of ids in the mapping
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record currently in the slot for `id`
    pub fn get(&self, id: u64) -> Option<Arc<Record>> {
        self.slots.get(&id).map(|slot| slot.load_full())
    }

    pub(crate) fn slot_values(&self) -> btree_map::Values<'_, u64, ArcSwap<Record>> {
        self.slots.values()
    }
}

/// Shared keyed store with a reader/writer guard
///
/// ## Concurrency:
/// - `mapping`: RwLock guards slot identity (which record each id points to)
/// - Record names are NOT guarded; see [`Store::mutate_name`]
/// - All methods use `&self`
pub struct Store {
    /// Live mapping, only repointed under the write lock
    mapping: RwLock<Arc<Mapping>>,

    /// Size of the fixed id range `0..population`
    population: usize,
}

impl Store {
    /// Create a store with ids `0..population`, names drawn from `generator`
    pub fn populate(population: usize, generator: &mut NameGenerator) -> Result<Self> {
        let mut slots = BTreeMap::new();
        for id in 0..population as u64 {
            let record = Record::new(id, &generator.next_name())?;
            slots.insert(id, ArcSwap::from_pointee(record));
        }

        tracing::info!(population, "Store populated");

        Ok(Self {
            mapping: RwLock::new(Arc::new(Mapping { slots })),
            population,
        })
    }

    /// Current record for `id` (read lock)
    pub fn get(&self, id: u64) -> Result<Arc<Record>> {
        let mapping = self.mapping.read();
        let record = self.slot(&mapping, id)?.load_full();
        Ok(record)
    }

    /// Point the slot for `id` at a new record (write lock)
    ///
    /// The superseded record is left untouched, so readers still holding
    /// it keep seeing a consistent id/name pair.
    pub fn replace(&self, id: u64, record: Record) -> Result<()> {
        if record.id() != id {
            return Err(BenchError::IdMismatch {
                slot: id,
                record: record.id(),
            });
        }

        let mapping = self.mapping.write();
        self.slot(&mapping, id)?.store(Arc::new(record));
        Ok(())
    }

    /// Overwrite the name of the current record for `id` in place
    ///
    /// The write lock is held only to fetch the record. It is released
    /// before the name is written, so the write races with any reader of
    /// the same record. This is intentional: it is the hazard the
    /// field-level strategy exists to expose.
    pub fn mutate_name(&self, id: u64, name: &str) -> Result<()> {
        let record = {
            let mapping = self.mapping.write();
            let current = self.slot(&mapping, id)?.load_full();
            current
        };

        record.set_name(name)
    }

    /// The live mapping itself (read lock for the call only)
    ///
    /// Nothing is copied. Slots of the returned mapping may be repointed
    /// as soon as this returns.
    pub fn snapshot_view(&self) -> Arc<Mapping> {
        Arc::clone(&*self.mapping.read())
    }

    /// A new mapping of every id to its current record (read lock held
    /// for the whole copy)
    ///
    /// The key and reference sets are a point-in-time view. The records
    /// themselves are shared with the live store.
    pub fn snapshot_copy(&self) -> BTreeMap<u64, Arc<Record>> {
        let mapping = self.mapping.read();
        let copy = mapping
            .slots
            .iter()
            .map(|(id, slot)| (*id, slot.load_full()))
            .collect();
        copy
    }

    /// Size of the fixed id range
    pub fn population(&self) -> usize {
        self.population
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn slot<'a>(&self, mapping: &'a Mapping, id: u64) -> Result<&'a ArcSwap<Record>> {
        mapping.slots.get(&id).ok_or(BenchError::IdOutOfRange {
            id,
            population: self.population,
        })
    }
}
