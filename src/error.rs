//! Error types for snapbench
//!
//! Provides a unified error type for all operations. Every variant is
//! fatal to a benchmark run; nothing is retried.

use thiserror::Error;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for snapbench operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // Identity Errors
    // -------------------------------------------------------------------------
    #[error("Record id {id} outside population 0..{population}")]
    IdOutOfRange { id: u64, population: usize },

    #[error("Record id {record} cannot be stored in slot {slot}")]
    IdMismatch { slot: u64, record: u64 },

    // -------------------------------------------------------------------------
    // Payload Errors
    // -------------------------------------------------------------------------
    #[error("Name is {len} bytes, cell capacity is {capacity}")]
    NameTooLong { len: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Mutation thread failed: {0}")]
    MutatorPanicked(String),
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for BenchError {
    fn from(err: bincode::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}
