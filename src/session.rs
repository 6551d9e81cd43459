//! Two-replica editing session
//!
//! A `ReplicaPair` holds the left and right editor's documents. Every
//! operation is authored on one side and then synced both ways, so after
//! each call both replicas show the same text.
//!
//! # Example
//!
//! ```rust
//! use eggwalker_core::diff::calc_diff;
//! use eggwalker_core::protocol::Side;
//! use eggwalker_core::session::ReplicaPair;
//!
//! let mut pair = ReplicaPair::new();
//! pair.insert(Side::Left, 0, "cat").unwrap();
//!
//! let snapshot = pair.apply_edit(Side::Right, &calc_diff("cat", "cut")).unwrap();
//! assert_eq!(snapshot.left, "cut");
//! assert_eq!(snapshot.right, "cut");
//! ```

use crate::crdt::Doc;
use crate::diff::TextEdit;
use crate::error::Result;
use crate::protocol::{
    decode_body, DeleteRequest, Route, SendRequest, Side, SyncResponse, UpstreamRequest,
};
use uuid::Uuid;

/// Left and right replicas kept in sync after every operation
#[derive(Debug, Clone)]
pub struct ReplicaPair {
    left: Doc,
    right: Doc,
}

impl Default for ReplicaPair {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplicaPair {
    /// Create a pair with freshly generated agents
    pub fn new() -> Self {
        let (left, right) = fresh_agents();
        Self::with_agents(left, right)
    }

    /// Create a pair with explicit agent names
    pub fn with_agents(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: Doc::new(left),
            right: Doc::new(right),
        }
    }

    pub fn doc(&self, side: Side) -> &Doc {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Current text of both replicas
    pub fn snapshot(&self) -> SyncResponse {
        SyncResponse {
            left: self.left.content(),
            right: self.right.content(),
        }
    }

    /// Insert `text` at `position` on `side`, then sync
    pub fn insert(&mut self, side: Side, position: usize, text: &str) -> Result<SyncResponse> {
        self.doc_mut(side).local_insert_text(position, text)?;
        self.sync_from(side)
    }

    /// Delete `count` chars at `position` on `side`, then sync
    pub fn delete(&mut self, side: Side, position: usize, count: usize) -> Result<SyncResponse> {
        self.doc_mut(side).local_delete(position, count)?;
        self.sync_from(side)
    }

    /// Replay an edit descriptor on `side`, then sync
    pub fn apply_edit(&mut self, side: Side, edit: &TextEdit) -> Result<SyncResponse> {
        self.doc_mut(side).apply_edit(edit)?;
        self.sync_from(side)
    }

    /// Replace both replicas with empty ones under new agents
    pub fn reset(&mut self) -> SyncResponse {
        let (left, right) = fresh_agents();
        tracing::debug!(%left, %right, "session reset");
        self.left = Doc::new(left);
        self.right = Doc::new(right);
        self.snapshot()
    }

    /// Serve a backend request against this pair
    ///
    /// `/send-right` inserts on the left replica, `/send-left` on the right
    /// one; `/delete` uses the side named in the body.
    pub fn handle(&mut self, request: &UpstreamRequest) -> Result<SyncResponse> {
        tracing::debug!(route = %request.route, "handling request");
        match request.route {
            Route::Delete => {
                let body: DeleteRequest = decode_body(&request.body)?;
                self.delete(body.agent, body.position, body.num_deletions)
            }
            Route::Send(direction) => {
                let body: SendRequest = decode_body(&request.body)?;
                self.insert(direction.source(), body.position, &body.text)
            }
            Route::Reset => Ok(self.reset()),
        }
    }

    fn doc_mut(&mut self, side: Side) -> &mut Doc {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn sync_from(&mut self, side: Side) -> Result<SyncResponse> {
        tracing::trace!(from = %side, to = %side.other(), "syncing replicas");
        let (source, target) = match side {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        };
        source.merge_from(target)?;
        target.merge_from(source)?;
        Ok(self.snapshot())
    }
}

fn fresh_agents() -> (String, String) {
    let session = Uuid::new_v4().simple().to_string();
    (format!("left-{}", session), format!("right-{}", session))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::diff::calc_diff;
    use proptest::prelude::*;

    fn text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("a".to_string()),
                Just("b".to_string()),
                Just(" ".to_string()),
                Just("é".to_string()),
                Just("🎉".to_string()),
            ],
            0..20,
        )
        .prop_map(|v| v.join(""))
    }

    fn side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Left), Just(Side::Right)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Property: a sequence of snapshots typed on either side is mirrored exactly
        #[test]
        fn snapshots_replay_on_both_replicas(
            steps in prop::collection::vec((side(), text()), 1..6),
        ) {
            let mut pair = ReplicaPair::with_agents("left", "right");
            let mut current = String::new();

            for (side, next) in steps {
                let edit = calc_diff(&current, &next);
                let snapshot = pair.apply_edit(side, &edit).unwrap();
                prop_assert_eq!(&snapshot.left, &next);
                prop_assert_eq!(&snapshot.right, &next);
                current = next;
            }
        }
    }
}
