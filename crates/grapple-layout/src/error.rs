//! Error types for layout oracles

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the built-in layout oracles
#[derive(Error, Debug)]
pub enum OracleError {
    /// Layout options failed validation
    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),

    /// An edge references a node missing from the request
    #[error("Edge {edge} references unknown node {node}")]
    UnknownEndpoint {
        /// Offending edge
        edge: String,
        /// Node id that was not found
        node: String,
    },

    /// The blocking layout task panicked or was cancelled
    #[error("Layout task failed: {0}")]
    Task(String),

    /// The external layout program could not be started or talked to
    #[error("Layout process error: {0}")]
    Process(#[from] std::io::Error),

    /// The external layout program exited unsuccessfully
    #[error("Layout process exited with {status}: {stderr}")]
    ProcessFailed {
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// A response could not be parsed or serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Forced failure from a mock oracle
    #[error("Mock oracle failure: {0}")]
    Mock(String),
}

/// Error from an oracle wrapped with a deadline
#[derive(Error, Debug)]
pub enum TimeoutError<E> {
    /// The oracle did not answer in time
    #[error("Layout timed out after {0:?}")]
    Elapsed(Duration),

    /// The wrapped oracle failed
    #[error("{0}")]
    Oracle(E),
}
