//! Backend protocol: request/response payloads and edit conversion
//!
//! The forwarding layer posts these bodies verbatim; nothing here performs
//! network I/O.

pub mod messages;
pub mod serialize;

pub use messages::{DeleteRequest, Direction, Route, SendRequest, Side, SyncResponse};
pub use serialize::{decode_body, encode_body, requests_for_edit, UpstreamRequest};
