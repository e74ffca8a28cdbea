//! Error types for the enumerator and the master/worker protocol.

use crate::parallel::messages::Rank;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QueensError>;

/// Errors that can occur while enumerating or coordinating a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueensError {
    /// Problem parameters rejected before anything was broadcast.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Enumerator called with an inconsistent level range.
    #[error("invalid search range [{start}, {max}) on a board of {len} rows")]
    InvalidRange { start: usize, max: usize, len: usize },

    /// A peer broke the message contract. Fatal for the whole run.
    #[error("protocol violation from rank {rank}: {reason}")]
    Protocol { rank: Rank, reason: String },

    /// The channel to a peer was closed underneath us.
    #[error("rank {rank} disconnected")]
    Disconnected { rank: Rank },

    /// A worker stopped on a fatal error of its own.
    #[error("worker {rank} aborted: {reason}")]
    WorkerAborted { rank: Rank, reason: String },

    /// Every worker hung up on the master.
    #[error("all workers disconnected")]
    WorkersDisconnected,

    /// A worker thread panicked instead of returning.
    #[error("worker {rank} panicked")]
    WorkerPanicked { rank: Rank },
}

impl QueensError {
    pub(crate) fn protocol(rank: Rank, reason: impl Into<String>) -> Self {
        Self::Protocol {
            rank,
            reason: reason.into(),
        }
    }
}
