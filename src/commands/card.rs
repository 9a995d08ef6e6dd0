//! `card.*` command builders.

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

/// Configure interrupt detection between the host and the device.
pub fn attn<T: Transport>(
    card: &mut Connection<T>,
    mode: Option<&str>,
    files: Option<&[&str]>,
    seconds: Option<u32>,
) -> Result<Response> {
    let mut req = request("card.attn");
    if let Some(mode) = mode {
        req.insert("mode".to_string(), Value::from(mode));
    }
    if let Some(files) = files {
        req.insert("files".to_string(), json!(files));
    }
    if let Some(seconds) = seconds {
        req.insert("seconds".to_string(), json!(seconds));
    }
    card.transact(&req)
}

/// Retrieve the current time and date from the device.
pub fn time<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("card.time"))
}

/// Retrieve the device status.
pub fn status<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("card.status"))
}

/// Retrieve the current temperature from the device.
pub fn temp<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("card.temp"))
}

/// Retrieve firmware version information from the device.
pub fn version<T: Transport>(card: &mut Connection<T>) -> Result<Response> {
    card.transact(&request("card.version"))
}

/// Retrieve current and historical voltage information.
pub fn voltage<T: Transport>(
    card: &mut Connection<T>,
    hours: Option<u32>,
    offset: Option<u32>,
    vmax: Option<f64>,
    vmin: Option<f64>,
) -> Result<Response> {
    let mut req = request("card.voltage");
    if let Some(hours) = hours {
        req.insert("hours".to_string(), json!(hours));
    }
    if let Some(offset) = offset {
        req.insert("offset".to_string(), json!(offset));
    }
    if let Some(vmax) = vmax {
        req.insert("vmax".to_string(), json!(vmax));
    }
    if let Some(vmin) = vmin {
        req.insert("vmin".to_string(), json!(vmin));
    }
    card.transact(&req)
}

/// Retrieve wireless modem information or customize modem behavior.
pub fn wireless<T: Transport>(card: &mut Connection<T>, mode: Option<&str>) -> Result<Response> {
    let mut req = request("card.wireless");
    if let Some(mode) = mode {
        req.insert("mode".to_string(), Value::from(mode));
    }
    card.transact(&req)
}
