//! Item ID and origins: identity and anchoring for replica items
//!
//! Each inserted character has a unique ID composed of:
//! - Agent: Identifies the replica (session or device, not user) that created it
//! - Seq: Per-agent sequence number, starting at 1

use crate::AgentID;
use serde::{Deserialize, Serialize};

/// Unique identifier for a replica item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId {
    /// Agent that created this item
    pub agent: AgentID,

    /// Sequence number within that agent's operations
    pub seq: u64,
}

impl ItemId {
    /// Create a new item ID
    pub fn new(agent: impl Into<String>, seq: u64) -> Self {
        Self {
            agent: agent.into(),
            seq,
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.agent, self.seq)
    }
}

/// What an item was inserted after
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeftOrigin {
    /// Start of the document
    Beginning,
    Item(ItemId),
}

/// What an item was inserted before
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RightOrigin {
    /// End of the document
    End,
    Item(ItemId),
}

impl LeftOrigin {
    pub fn id(&self) -> Option<&ItemId> {
        match self {
            LeftOrigin::Beginning => None,
            LeftOrigin::Item(id) => Some(id),
        }
    }
}

impl RightOrigin {
    pub fn id(&self) -> Option<&ItemId> {
        match self {
            RightOrigin::End => None,
            RightOrigin::Item(id) => Some(id),
        }
    }
}
