//! Record implementation
//!
//! A record pairs a fixed id with a name payload that can be rewritten in
//! place without any lock.

use std::fmt;
use std::sync::atomic::{fence, AtomicU64, AtomicU8, AtomicUsize, Ordering};

use crate::error::{BenchError, Result};
use crate::names::MAX_NAME_LEN;

/// A keyed entity held by the [`Store`](super::Store)
///
/// `id` never changes. `name` may be overwritten by the field-level
/// mutation strategy while other threads are reading it.
pub struct Record {
    id: u64,
    name: NameCell,
}

impl Record {
    /// Create a record; fails if `name` does not fit the payload cell
    pub fn new(id: u64, name: &str) -> Result<Self> {
        Ok(Self {
            id,
            name: NameCell::new(name)?,
        })
    }

    /// The record's stable identity
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current name, without overlap detection
    pub fn name(&self) -> String {
        self.name.read().value
    }

    /// Current name plus whether a write overlapped the read
    pub fn read_name(&self) -> NameRead {
        self.name.read()
    }

    /// Number of in-place writes applied to the name
    pub fn write_count(&self) -> u64 {
        self.name.sequence.load(Ordering::Acquire) / 2
    }

    /// Overwrite the name in place, holding no lock
    pub(crate) fn set_name(&self, name: &str) -> Result<()> {
        self.name.write(name)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Result of reading a name cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRead {
    /// Bytes observed, possibly a mix of two writes
    pub value: String,

    /// True if a write was in flight during the read
    pub torn: bool,
}

// =============================================================================
// Name Cell
// =============================================================================

/// Fixed-capacity name storage written one byte at a time
///
/// Every byte is its own relaxed atomic, so a reader racing a writer sees
/// an arbitrary interleaving of old and new bytes. `sequence` is odd
/// while a write is in progress and advances by two per completed write;
/// a reader that sees it odd, or changed across its read, reports the
/// read as torn.
struct NameCell {
    bytes: Box<[AtomicU8]>,
    len: AtomicUsize,
    sequence: AtomicU64,
}

impl NameCell {
    fn new(name: &str) -> Result<Self> {
        Self::check_len(name)?;

        let bytes: Box<[AtomicU8]> = (0..MAX_NAME_LEN)
            .map(|i| AtomicU8::new(name.as_bytes().get(i).copied().unwrap_or(0)))
            .collect();

        Ok(Self {
            bytes,
            len: AtomicUsize::new(name.len()),
            sequence: AtomicU64::new(0),
        })
    }

    fn check_len(name: &str) -> Result<()> {
        if name.len() > MAX_NAME_LEN {
            return Err(BenchError::NameTooLong {
                len: name.len(),
                capacity: MAX_NAME_LEN,
            });
        }
        Ok(())
    }

    fn write(&self, name: &str) -> Result<()> {
        Self::check_len(name)?;

        self.sequence.fetch_add(1, Ordering::Relaxed);
        fence(Ordering::Release);

        for (slot, byte) in self.bytes.iter().zip(name.bytes()) {
            slot.store(byte, Ordering::Relaxed);
        }
        self.len.store(name.len(), Ordering::Relaxed);

        self.sequence.fetch_add(1, Ordering::Release);
        Ok(())
    }

    fn read(&self) -> NameRead {
        let before = self.sequence.load(Ordering::Acquire);

        let len = self.len.load(Ordering::Relaxed).min(self.bytes.len());
        let raw: Vec<u8> = self.bytes[..len]
            .iter()
            .map(|b| b.load(Ordering::Relaxed))
            .collect();

        fence(Ordering::Acquire);
        let after = self.sequence.load(Ordering::Relaxed);

        NameRead {
            value: String::from_utf8_lossy(&raw).into_owned(),
            torn: before % 2 == 1 || before != after,
        }
    }
}
