//! Eggwalker Core - text diffing for real-time collaborative editing
//!
//! This is the Rust core of the eggwalker editor, compiled to both native
//! and WASM. It implements:
//! - A single-pass diff reducer turning two text snapshots into one
//!   `{pos, del, ins}` edit descriptor
//! - Replicated text documents (Fugue-max sequence CRDT) the edits apply to
//! - A two-replica editing session and its backend request payloads
//!
//! # Examples
//!
//! ```rust
//! use eggwalker_core::{calc_diff, TextEdit};
//!
//! let edit = calc_diff("hello", "hello world");
//! assert_eq!(edit, TextEdit::new(5, 0, " world"));
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod protocol;

#[cfg(feature = "replica")]
pub mod crdt;

#[cfg(feature = "replica")]
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use config::UpstreamConfig;
pub use diff::{calc_diff, TextEdit};
pub use error::{Result, SyncError};

#[cfg(feature = "replica")]
pub use session::ReplicaPair;

/// Agent identifier type
pub type AgentID = String;
