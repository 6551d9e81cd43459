//! Item: The fundamental building block of a replica document
//!
//! Each item represents a single character with:
//! - Unique ID
//! - Content
//! - Left/right origins for conflict resolution
//! - Deleted flag (tombstone)

use super::id::{ItemId, LeftOrigin, RightOrigin};
use serde::{Deserialize, Serialize};

/// A single character in the replica document
///
/// Items form a linked structure where each item knows:
/// - What it was inserted after (left origin)
/// - What it was inserted before (right origin)
///
/// This enables deterministic conflict resolution when multiple
/// agents insert at the same position concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item
    pub id: ItemId,

    /// The character this item carries
    pub content: char,

    /// Item this was inserted after
    pub origin_left: LeftOrigin,

    /// Item this was inserted before
    pub origin_right: RightOrigin,

    /// Whether this item has been deleted
    pub deleted: bool,
}

impl Item {
    /// Create a new, visible item
    pub fn new(
        id: ItemId,
        content: char,
        origin_left: LeftOrigin,
        origin_right: RightOrigin,
    ) -> Self {
        Self {
            id,
            content,
            origin_left,
            origin_right,
            deleted: false,
        }
    }

    /// Mark this item as deleted
    pub fn delete(&mut self) {
        self.deleted = true;
    }

    pub fn is_visible(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let id = ItemId::new("left", 1);
        let item = Item::new(id.clone(), 'a', LeftOrigin::Beginning, RightOrigin::End);

        assert_eq!(item.id, id);
        assert_eq!(item.content, 'a');
        assert_eq!(item.origin_left, LeftOrigin::Beginning);
        assert_eq!(item.origin_right, RightOrigin::End);
        assert!(item.is_visible());
    }

    #[test]
    fn test_item_deletion() {
        let mut item = Item::new(
            ItemId::new("left", 1),
            'a',
            LeftOrigin::Beginning,
            RightOrigin::End,
        );

        assert!(!item.deleted);
        item.delete();
        assert!(item.deleted);
        assert!(!item.is_visible());
    }
}
