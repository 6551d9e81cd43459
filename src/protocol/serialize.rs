// Serialization layer - Convert edit descriptors to backend requests
//!
//! A single `TextEdit` becomes at most two requests: a `/delete` for the
//! removed span, then a `/send-<direction>` for the inserted text, both
//! at the descriptor's `pos`.

use super::messages::{DeleteRequest, Route, SendRequest, Side};
use crate::diff::TextEdit;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A request ready to be forwarded: target route plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub route: Route,
    pub body: serde_json::Value,
}

impl UpstreamRequest {
    pub fn new<M: Serialize>(route: Route, msg: &M) -> Result<Self> {
        Ok(Self {
            route,
            body: encode_body(msg)?,
        })
    }

    /// `/reset` carries no body
    pub fn reset() -> Self {
        Self {
            route: Route::Reset,
            body: serde_json::Value::Null,
        }
    }
}

/// Build the backend requests that replay `edit` typed on `side`
///
/// Returns an empty list for a no-op edit.
///
/// # Example
///
/// ```rust
/// use eggwalker_core::diff::calc_diff;
/// use eggwalker_core::protocol::{requests_for_edit, Route, Side};
///
/// let reqs = requests_for_edit(Side::Left, &calc_diff("cat", "cut")).unwrap();
/// let routes: Vec<_> = reqs.iter().map(|r| r.route.path()).collect();
/// assert_eq!(routes, ["/delete", "/send-right"]);
/// ```
pub fn requests_for_edit(side: Side, edit: &TextEdit) -> Result<Vec<UpstreamRequest>> {
    let mut requests = Vec::with_capacity(2);

    if edit.del > 0 {
        requests.push(UpstreamRequest::new(
            Route::Delete,
            &DeleteRequest {
                agent: side,
                position: edit.pos,
                num_deletions: edit.del,
            },
        )?);
    }

    if !edit.ins.is_empty() {
        requests.push(UpstreamRequest::new(
            Route::Send(side.direction()),
            &SendRequest {
                text: edit.ins.clone(),
                position: edit.pos,
            },
        )?);
    }

    Ok(requests)
}

/// Serialize any protocol message to a JSON body
pub fn encode_body<M: Serialize>(msg: &M) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(msg)?)
}

/// Deserialize a protocol message from a JSON body
pub fn decode_body<M: DeserializeOwned>(body: &serde_json::Value) -> Result<M> {
    Ok(M::deserialize(body)?)
}
