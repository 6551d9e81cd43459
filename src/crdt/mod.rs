//! Replicated text documents that edit descriptors are applied to
//!
//! This module contains a sequence CRDT in the Fugue-max / YjsMod family:
//! each character is an item anchored to the items it was typed between,
//! so replicas can exchange items in any causal order and converge.
//!
//! # Types
//!
//! - **ItemId:** agent + per-agent sequence number
//! - **Item:** one character plus origins and a tombstone flag
//! - **Doc:** one replica, with local edits and merge
//!
//! # References
//!
//! - "Fugue: A CRDT for Collaborative Text Editing" (arXiv:2305.00583)
//! - "Near Real-Time Peer-to-Peer Shared Editing on Extensible Data Types" (YATA)

mod doc;
mod id;
mod item;

pub use doc::{Doc, Version};
pub use id::{ItemId, LeftOrigin, RightOrigin};
pub use item::Item;
