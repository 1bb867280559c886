//! # snapbench
//!
//! A harness that measures, and exposes the hazards of, snapshotting a
//! keyed store while another thread keeps changing it:
//! - Live view vs point-in-time copy on the read side
//! - Whole-record replacement vs in-place name update on the write side
//! - Reader/writer guard around the mapping, never around record names
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────┐        ┌───────────────────────────┐
//! │      Mutation Loop        │        │     Serialization Loop    │
//! │   (background thread)     │        │     (calling thread)      │
//! │  WholeRecord | FieldLevel │        │       View | Copy         │
//! └─────────────┬─────────────┘        └─────────────┬─────────────┘
//!               │ replace / mutate_name              │ snapshot_view / snapshot_copy
//!               ▼                                    ▼
//!        ┌─────────────────────────────────────────────────┐
//!        │                     Store                       │
//!        │      RwLock<Arc<Mapping>>  (slot identity)      │
//!        └────────────────────────┬────────────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │     Record      │
//!                        │ id | name (NO   │
//!                        │  guard on name) │
//!                        └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod names;
pub mod store;
pub mod snapshot;
pub mod mutation;
pub mod shutdown;
pub mod driver;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::Config;
pub use driver::{Driver, RunReport};
pub use mutation::MutationStrategy;
pub use shutdown::Shutdown;
pub use snapshot::{Codec, SnapshotStrategy};
pub use store::{Record, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of snapbench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
