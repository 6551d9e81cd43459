//! Wire messages exchanged with the editing backend
//!
//! Field names match the JSON the backend expects (`numDeletions` is
//! camelCase, everything else is a single word).

use serde::{Deserialize, Serialize};

/// Which of the two editors an edit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction an edit typed on this side travels in
    pub fn direction(self) -> Direction {
        match self {
            Side::Left => Direction::Right,
            Side::Right => Direction::Left,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Channel an insertion is sent on: `send-right` carries edits typed on the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Side whose replica authors edits sent in this direction
    pub fn source(self) -> Side {
        match self {
            Direction::Right => Side::Left,
            Direction::Left => Side::Right,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Body of `/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub agent: Side,
    pub position: usize,
    pub num_deletions: usize,
}

/// Body of `/send-left` and `/send-right`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub text: String,
    pub position: usize,
}

/// Both replicas' visible text, returned by every backend route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub left: String,
    pub right: String,
}

impl SyncResponse {
    /// True when both replicas show the same text
    pub fn converged(&self) -> bool {
        self.left == self.right
    }
}

/// Backend endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Delete,
    Send(Direction),
    Reset,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Delete => "/delete",
            Route::Send(Direction::Left) => "/send-left",
            Route::Send(Direction::Right) => "/send-right",
            Route::Reset => "/reset",
        }
    }

    /// Inverse of [`Route::path`]
    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/delete" => Some(Route::Delete),
            "/send-left" => Some(Route::Send(Direction::Left)),
            "/send-right" => Some(Route::Send(Direction::Right)),
            "/reset" => Some(Route::Reset),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
