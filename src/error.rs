//! Error types shared by the replica, session and protocol layers
//!
//! The diff reducer itself is total and never produces an error.

use thiserror::Error;

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors raised while applying edits, merging replicas or building payloads
#[derive(Debug, Error)]
pub enum SyncError {
    /// Position is past the end of the visible text
    #[error("Position {position} out of bounds (length: {length})")]
    PositionOutOfBounds { position: usize, length: usize },

    /// Range does not fit inside the visible text
    #[error("Range {start}..{end} out of bounds (length: {length})")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    /// Item sequence number does not directly follow the agent's version
    #[error("Operation out of order for agent {agent}: expected seq {expected}, got {got}")]
    OutOfOrder {
        agent: String,
        expected: u64,
        got: u64,
    },

    /// Item references an origin the document has never seen
    #[error("Origin not found: {0}")]
    MissingOrigin(String),

    /// Merge pass could not integrate any of the remaining items
    #[error("Merge not making progress: {remaining} items could not be integrated")]
    MergeStalled { remaining: usize },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
