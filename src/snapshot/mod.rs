//! Snapshot Module
//!
//! The two read paths the serialization loop can take.
//!
//! ## Strategies
//! - `View`: the store's live mapping. No allocation; every slot is read
//!   after the guard is gone, so a replacement can land mid-walk.
//! - `Copy`: a fresh mapping built under the read guard. The id and
//!   record sets are fixed, but records are still shared with the store,
//!   so an in-place name write can still be seen mid-walk.
//!
//! Both are kept on purpose. The view is not a bug to be fixed here; it
//! is one of the two subjects being measured.

mod codec;

pub use codec::{Codec, Encoded, RecordImage};

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::store::{Mapping, Record, Store};

/// How the reader obtains a snapshot from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStrategy {
    /// Alias the live mapping
    View,

    /// Copy the mapping under the read guard
    Copy,
}

impl SnapshotStrategy {
    /// Take a snapshot of `store` using this strategy
    pub fn take(self, store: &Store) -> Snapshot {
        match self {
            SnapshotStrategy::View => Snapshot::View(store.snapshot_view()),
            SnapshotStrategy::Copy => Snapshot::Copy(store.snapshot_copy()),
        }
    }

    /// Startup banner line
    pub fn banner(self) -> &'static str {
        match self {
            SnapshotStrategy::View => "Using shallow map copy",
            SnapshotStrategy::Copy => "Using deep map copy",
        }
    }
}

/// A snapshot produced by one read-loop iteration
pub enum Snapshot {
    /// The live mapping, still changing
    View(Arc<Mapping>),

    /// An independent mapping sharing record references with the store
    Copy(BTreeMap<u64, Arc<Record>>),
}

impl Snapshot {
    /// Number of ids in the snapshot
    pub fn len(&self) -> usize {
        match self {
            Snapshot::View(mapping) => mapping.len(),
            Snapshot::Copy(copy) => copy.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strategy that produced this snapshot
    pub fn strategy(&self) -> SnapshotStrategy {
        match self {
            Snapshot::View(_) => SnapshotStrategy::View,
            Snapshot::Copy(_) => SnapshotStrategy::Copy,
        }
    }

    /// Records in ascending id order
    ///
    /// For a view each slot is loaded as the iterator reaches it.
    pub fn records(&self) -> Records<'_> {
        match self {
            Snapshot::View(mapping) => Records::View(mapping.slot_values()),
            Snapshot::Copy(copy) => Records::Copy(copy.values()),
        }
    }

    /// Serialize every record with `codec`
    pub fn encode(&self, codec: Codec) -> crate::Result<Encoded> {
        codec.encode(self)
    }
}

/// Iterator over a snapshot's records
pub enum Records<'a> {
    View(btree_map::Values<'a, u64, ArcSwap<Record>>),
    Copy(btree_map::Values<'a, u64, Arc<Record>>),
}

impl Iterator for Records<'_> {
    type Item = Arc<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Records::View(slots) => slots.next().map(|slot| slot.load_full()),
            Records::Copy(records) => records.next().cloned(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Records::View(slots) => slots.size_hint(),
            Records::Copy(records) => records.size_hint(),
        }
    }
}

impl ExactSizeIterator for Records<'_> {}
