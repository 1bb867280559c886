//! Snapshot codec
//!
//! Encodes a snapshot as an id → record map.
//!
//! ## JSON Shape
//! ```text
//! {"0":{"ID":0,"Name":"Teal-00412987"},"1":{"ID":1,"Name":"Snow-00000031"},...}
//! ```
//! Bincode encodes the same map (u64 keys, length-prefixed).
//!
//! Names are read while the encoder walks the snapshot, outside any
//! lock. Each read is checked for an overlapping write and the count is
//! returned with the encoded bytes.

use std::cell::Cell;

use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

use super::Snapshot;

/// Encoding used by the serialization loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// serde_json text
    #[default]
    Json,

    /// bincode binary
    Bincode,
}

/// One record as it appears in an encoded snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordImage {
    #[serde(rename = "ID")]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,
}

/// Output of encoding one snapshot
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Encoded payload
    pub bytes: Bytes,

    /// CRC32 of `bytes`
    pub checksum: u32,

    /// Records written
    pub records: usize,

    /// Names read while a write to them was in flight
    pub torn_reads: usize,
}

impl Codec {
    /// Encode `snapshot`, auditing every name read
    pub fn encode(self, snapshot: &Snapshot) -> Result<Encoded> {
        let audited = Audited {
            snapshot,
            records: Cell::new(0),
            torn_reads: Cell::new(0),
        };

        let raw = match self {
            Codec::Json => serde_json::to_vec(&audited)?,
            Codec::Bincode => bincode::serialize(&audited)?,
        };

        Ok(Encoded {
            checksum: crc32fast::hash(&raw),
            bytes: Bytes::from(raw),
            records: audited.records.get(),
            torn_reads: audited.torn_reads.get(),
        })
    }
}

/// Serializes a snapshot while counting torn name reads
struct Audited<'a> {
    snapshot: &'a Snapshot,
    records: Cell<usize>,
    torn_reads: Cell<usize>,
}

impl Serialize for Audited<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.snapshot.records().map(|record| {
            let name = record.read_name();
            self.records.set(self.records.get() + 1);
            if name.torn {
                self.torn_reads.set(self.torn_reads.get() + 1);
            }

            let id = record.id();
            (id, RecordImage { id, name: name.value })
        }))
    }
}
