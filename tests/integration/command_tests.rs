//! Command builder tests: request assembly and response passthrough.

use notelink::commands::{card, file};
use notelink::{Error, open_i2c, open_serial};
use serde_json::Value;

use crate::mock_bus::{MockClock, MockI2cDevice, MockSerialPort};

/// Decode the request the device saw (terminator stripped).
fn sent_request(port: &MockSerialPort) -> serde_json::Map<String, Value> {
    let frame = port.written();
    assert!(frame.ends_with(b"\r\n"));
    serde_json::from_slice(&frame[..frame.len() - 2]).unwrap()
}

#[test]
fn card_time_parses_epoch_seconds() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{\"time\":1592490375}\r\n");
    let rsp = card::time(&mut conn).unwrap();
    assert_eq!(rsp.get("time").and_then(Value::as_u64), Some(1_592_490_375));
}

#[test]
fn card_status_passes_response_through_unmodified() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{\"usb\":true,\"status\":\"{normal}\"}\r\n");
    let rsp = card::status(&mut conn).unwrap();
    assert_eq!(rsp.get("usb"), Some(&Value::Bool(true)));
    assert_eq!(rsp.get("status").and_then(Value::as_str), Some("{normal}"));
}

#[test]
fn builder_with_no_optionals_sends_bare_command() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written();

    port.push_response(b"{}\r\n");
    card::attn(&mut conn, None, None, None).unwrap();

    let req = sent_request(&port);
    assert_eq!(req.len(), 1, "omitted optionals must not appear at all");
    assert_eq!(req.get("req").and_then(Value::as_str), Some("card.attn"));
}

#[test]
fn builder_includes_only_supplied_optionals() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written();

    port.push_response(b"{}\r\n");
    card::voltage(&mut conn, Some(24), None, None, None).unwrap();

    let req = sent_request(&port);
    assert_eq!(req.get("req").and_then(Value::as_str), Some("card.voltage"));
    assert_eq!(req.get("hours").and_then(Value::as_u64), Some(24));
    assert!(!req.contains_key("offset"));
    assert!(!req.contains_key("vmax"));
    assert!(!req.contains_key("vmin"));
}

#[test]
fn supplied_zero_is_not_omitted() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written();

    port.push_response(b"{}\r\n");
    card::voltage(&mut conn, Some(0), None, None, None).unwrap();

    let req = sent_request(&port);
    assert_eq!(req.get("hours").and_then(Value::as_u64), Some(0));
}

#[test]
fn attn_forwards_files_array_unmodified() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written();

    port.push_response(b"{}\r\n");
    card::attn(&mut conn, Some("files"), Some(&["data.qo", "events.qo"]), Some(60)).unwrap();

    let req = sent_request(&port);
    assert_eq!(req.get("mode").and_then(Value::as_str), Some("files"));
    assert_eq!(
        req.get("files"),
        Some(&serde_json::json!(["data.qo", "events.qo"]))
    );
    assert_eq!(req.get("seconds").and_then(Value::as_u64), Some(60));
}

#[test]
fn file_changes_builds_tracker_query() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written();

    port.push_response(b"{\"total\":3}\r\n");
    let rsp = file::changes(&mut conn, Some("multi"), None).unwrap();

    let req = sent_request(&port);
    assert_eq!(req.get("req").and_then(Value::as_str), Some("file.changes"));
    assert_eq!(req.get("tracker").and_then(Value::as_str), Some("multi"));
    assert_eq!(rsp.get("total").and_then(Value::as_u64), Some(3));
}

#[test]
fn file_stats_returns_empty_mapping_for_empty_object() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{}\r\n");
    let rsp = file::stats(&mut conn).unwrap();
    assert!(rsp.is_empty());
}

#[test]
fn builder_on_invalid_handle_fails_before_io() {
    let device = MockI2cDevice::new();
    let mut conn = open_i2c(device.clone(), MockClock::new(), 0x00, 255);

    let err = card::status(&mut conn).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
    assert_eq!(device.io_ops(), 0);
}

#[test]
fn builder_returns_command_error_as_data() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{\"err\":\"no modem\"}\r\n");
    let rsp = card::wireless(&mut conn, Some("auto")).unwrap();
    assert_eq!(rsp.get("err").and_then(Value::as_str), Some("no modem"));
}
