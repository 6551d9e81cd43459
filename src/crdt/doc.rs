//! Doc: a replicated text document
//!
//! Every character is an [`Item`] anchored between two origins. Local
//! edits create items; remote items are placed with the Fugue-max
//! integration scan, which keeps runs typed concurrently at the same spot
//! from interleaving.
//!
//! Items are never removed. Deletion sets a tombstone flag so later
//! items can still reference deleted origins.
//!
//! # Example
//!
//! ```rust
//! use eggwalker_core::crdt::Doc;
//!
//! let mut left = Doc::new("left");
//! let mut right = Doc::new("right");
//!
//! left.local_insert_text(0, "Hello").unwrap();
//! right.local_insert_text(0, "World").unwrap();
//!
//! left.merge_from(&right).unwrap();
//! right.merge_from(&left).unwrap();
//!
//! assert_eq!(left.content(), right.content());
//! ```

use super::id::{ItemId, LeftOrigin, RightOrigin};
use super::item::Item;
use crate::diff::TextEdit;
use crate::error::{Result, SyncError};
use crate::AgentID;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Highest integrated sequence number per agent
pub type Version = BTreeMap<AgentID, u64>;

/// Replicated text document owned by one agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    /// Agent that authors local edits on this replica
    agent: AgentID,

    /// All items in document order, tombstones included
    items: Vec<Item>,

    version: Version,
}

impl Doc {
    /// Create an empty document for `agent`
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            items: Vec::new(),
            version: Version::new(),
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// All items in document order, including deleted ones
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Visible text (deleted items omitted)
    pub fn content(&self) -> String {
        self.items
            .iter()
            .filter(|item| item.is_visible())
            .map(|item| item.content)
            .collect()
    }

    /// Number of visible chars
    pub fn len(&self) -> usize {
        self.items.iter().filter(|item| item.is_visible()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` has already been integrated
    pub fn contains(&self, id: &ItemId) -> bool {
        self.version
            .get(&id.agent)
            .is_some_and(|&highest| highest >= id.seq)
    }

    /// Insert `text` so that its first char lands at visible position `position`
    ///
    /// # Errors
    ///
    /// Returns `SyncError::PositionOutOfBounds` if `position > len()`.
    pub fn local_insert_text(&mut self, position: usize, text: &str) -> Result<()> {
        let length = self.len();
        if position > length {
            return Err(SyncError::PositionOutOfBounds { position, length });
        }

        for (offset, ch) in text.chars().enumerate() {
            self.local_insert_char(position + offset, ch)?;
        }

        tracing::trace!(
            agent = %self.agent,
            position,
            chars = text.chars().count(),
            "local insert"
        );
        Ok(())
    }

    fn local_insert_char(&mut self, position: usize, ch: char) -> Result<()> {
        let seq = self.version.get(&self.agent).copied().unwrap_or(0) + 1;
        let index = self.insert_slot(position)?;

        let origin_left = match index.checked_sub(1) {
            Some(prev) => LeftOrigin::Item(self.items[prev].id.clone()),
            None => LeftOrigin::Beginning,
        };
        let origin_right = match self.items.get(index) {
            Some(next) => RightOrigin::Item(next.id.clone()),
            None => RightOrigin::End,
        };

        let item = Item::new(
            ItemId::new(self.agent.clone(), seq),
            ch,
            origin_left,
            origin_right,
        );
        self.integrate(item)
    }

    /// Delete `count` visible chars starting at `position`
    ///
    /// Nothing is deleted if the range does not fit.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::RangeOutOfBounds` if `position + count > len()`.
    pub fn local_delete(&mut self, position: usize, count: usize) -> Result<()> {
        let length = self.len();
        let end = position.saturating_add(count);
        if end > length {
            return Err(SyncError::RangeOutOfBounds {
                start: position,
                end,
                length,
            });
        }

        for _ in 0..count {
            let index = self
                .visible_index(position)
                .ok_or(SyncError::PositionOutOfBounds { position, length })?;
            self.items[index].delete();
        }

        tracing::trace!(agent = %self.agent, position, count, "local delete");
        Ok(())
    }

    /// Replay an edit descriptor as a local delete followed by a local insert
    ///
    /// ```rust
    /// use eggwalker_core::crdt::Doc;
    /// use eggwalker_core::diff::calc_diff;
    ///
    /// let mut doc = Doc::new("left");
    /// doc.local_insert_text(0, "cat").unwrap();
    /// doc.apply_edit(&calc_diff("cat", "cut")).unwrap();
    /// assert_eq!(doc.content(), "cut");
    /// ```
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<()> {
        if edit.del > 0 {
            self.local_delete(edit.pos, edit.del)?;
        }
        if !edit.ins.is_empty() {
            self.local_insert_text(edit.pos, &edit.ins)?;
        }
        Ok(())
    }

    /// Place an item into the document
    ///
    /// The item must be the next operation of its agent and both of its
    /// origins must already be present.
    ///
    /// # Errors
    ///
    /// - `SyncError::OutOfOrder` if `seq` is not the agent's next sequence number
    /// - `SyncError::MissingOrigin` if an origin has not been integrated
    pub fn integrate(&mut self, item: Item) -> Result<()> {
        let expected = self.version.get(&item.id.agent).copied().unwrap_or(0) + 1;
        if item.id.seq != expected {
            return Err(SyncError::OutOfOrder {
                agent: item.id.agent.clone(),
                expected,
                got: item.id.seq,
            });
        }

        // Slots are item index + 1 for left origins so the document start is 0
        let new_left = self.left_slot(&item.origin_left)?;
        let new_right = self.right_index(&item.origin_right)?;

        let mut dest = new_left;
        let mut scanning = false;

        for i in new_left..=new_right {
            if !scanning {
                dest = i;
            }

            if i == new_right || i == self.items.len() {
                break;
            }

            let existing = &self.items[i];
            let existing_left = self.left_slot(&existing.origin_left)?;
            let existing_right = self.right_index(&existing.origin_right)?;

            match existing_left.cmp(&new_left) {
                Ordering::Less => break,
                Ordering::Greater => continue,
                Ordering::Equal => match existing_right.cmp(&new_right) {
                    // Might insert after this one; keep scanning to be sure
                    Ordering::Less => scanning = true,
                    Ordering::Equal => {
                        if item.id.agent < existing.id.agent {
                            break;
                        }
                        scanning = false;
                    }
                    Ordering::Greater => scanning = false,
                },
            }
        }

        self.version.insert(item.id.agent.clone(), item.id.seq);
        self.items.insert(dest, item);
        Ok(())
    }

    /// Merge every item of `other` into this document
    ///
    /// Items are integrated once their predecessor and origins are known.
    /// Deletions seen by `other` are then copied over. Merging the same
    /// document twice has no further effect.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::MergeStalled` if some items can never become ready.
    pub fn merge_from(&mut self, other: &Doc) -> Result<()> {
        let mut pending: Vec<&Item> = other
            .items
            .iter()
            .filter(|item| !self.contains(&item.id))
            .collect();
        let incoming = pending.len();

        while !pending.is_empty() {
            let mut blocked = Vec::new();
            let mut progressed = false;

            for item in pending {
                if self.can_integrate(item) {
                    self.integrate(item.clone())?;
                    progressed = true;
                } else {
                    blocked.push(item);
                }
            }

            if !progressed {
                return Err(SyncError::MergeStalled {
                    remaining: blocked.len(),
                });
            }
            pending = blocked;
        }

        let deleted: HashSet<&ItemId> = other
            .items
            .iter()
            .filter(|item| item.deleted)
            .map(|item| &item.id)
            .collect();
        if !deleted.is_empty() {
            for item in &mut self.items {
                if deleted.contains(&item.id) {
                    item.delete();
                }
            }
        }

        tracing::debug!(
            agent = %self.agent,
            from = %other.agent,
            incoming,
            "merged replica"
        );
        Ok(())
    }

    fn can_integrate(&self, item: &Item) -> bool {
        let in_order = item.id.seq == 1
            || self.contains(&ItemId::new(item.id.agent.clone(), item.id.seq - 1));
        let left_known = item.origin_left.id().map_or(true, |id| self.contains(id));
        let right_known = item.origin_right.id().map_or(true, |id| self.contains(id));

        !self.contains(&item.id) && in_order && left_known && right_known
    }

    /// Index in `items` where a char at visible `position` is inserted
    ///
    /// Position 0 is the very start, before any leading tombstones; any
    /// other position is directly after the previous visible item.
    fn insert_slot(&self, position: usize) -> Result<usize> {
        if position == 0 {
            return Ok(0);
        }

        let mut remaining = position;
        for (index, item) in self.items.iter().enumerate() {
            if item.is_visible() {
                remaining -= 1;
                if remaining == 0 {
                    return Ok(index + 1);
                }
            }
        }

        Err(SyncError::PositionOutOfBounds {
            position,
            length: self.len(),
        })
    }

    /// Index in `items` of the visible char at `position`
    fn visible_index(&self, position: usize) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible())
            .nth(position)
            .map(|(index, _)| index)
    }

    fn index_of(&self, id: &ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| SyncError::MissingOrigin(id.to_string()))
    }

    fn left_slot(&self, origin: &LeftOrigin) -> Result<usize> {
        match origin {
            LeftOrigin::Beginning => Ok(0),
            LeftOrigin::Item(id) => Ok(self.index_of(id)? + 1),
        }
    }

    fn right_index(&self, origin: &RightOrigin) -> Result<usize> {
        match origin {
            RightOrigin::End => Ok(self.items.len()),
            RightOrigin::Item(id) => self.index_of(id),
        }
    }
}
