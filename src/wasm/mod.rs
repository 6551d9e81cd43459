//! WASM bindings for eggwalker
//!
//! This module provides JavaScript-friendly bindings for the diff reducer
//! and the two-replica session.

#[cfg(feature = "wasm")]
pub mod bindings;

#[cfg(feature = "wasm")]
pub mod utils;

// Re-export main types
#[cfg(feature = "wasm")]
pub use bindings::{calc_diff, WasmTextEdit};

#[cfg(all(feature = "wasm", feature = "replica"))]
pub use bindings::WasmReplicaPair;
