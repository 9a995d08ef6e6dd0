//! `file.*` command builders.

use alloc::string::ToString;

use serde_json::{Value, json};

use crate::codec::{Request, Response};
use crate::error::Result;
use crate::transaction::Connection;
use crate::transport::Transport;

fn request(name: &str) -> Request {
    let mut req = Request::new();
    req.insert("req".to_string(), Value::from(name));
    req
}

/// Perform individual or batch change queries on notefiles.
pub fn changes<T: Transport>(
    card: &mut Connection<T>,
    tracker: Option<&str>,
    files: Option<&[&str]>,
) -> Result<Response> {
    let mut req = request("file.changes");
    if let Some(tracker) = tracker {
        req.insert("tracker".to_string(), Value::from(tracker));
    }
    if let Some(files) = files {
        req.insert("files".to_string(), json!(files));
    }
    card.transact(&req)
}

/// Delete individual notefiles and their contents.
pub fn delete<T: Transport>(card: &mut Connection<T>, files: Option<&[&str]>) -> Result<Response> {
    let mut req = request("file.delete");
    if let Some(files) = files {
        req.insert("files".to_string(), json!(files));
    }
    card.transact(&req)
}

/// Obtain statistics about local notefiles.
pub fn stats<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("file.stats"))
}

/// Retrieve information about pending sync changes.
pub fn pending_changes<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("file.changes.pending"))
}
