//! Store Module
//!
//! The shared keyed collection every benchmark thread works against.
//!
//! ## Responsibilities
//! - Own the fixed id → record mapping and its reader/writer guard
//! - Hand out snapshots (live view or point-in-time copy)
//! - Apply whole-record replacement and in-place name updates
//!
//! ## Locking Scope
//! ```text
//!   get / snapshot_view / snapshot_copy   read lock, for the call only
//!   replace                               write lock, slot swap inside
//!   mutate_name                           write lock to fetch, NONE to write
//! ```
//! Record names are never covered by the guard. Serialization of any
//! snapshot happens after the guard is released.

mod record;
mod table;

pub use record::{NameRead, Record};
pub use table::{Mapping, Store};
