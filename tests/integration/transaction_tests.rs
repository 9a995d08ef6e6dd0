//! Serial transaction tests: framing, timeout, decode, and reuse.

use notelink::{Error, Request, open_serial};
use serde_json::{Value, json};

use crate::mock_bus::{MockClock, MockSerialPort};

fn status_request() -> Request {
    let mut req = Request::new();
    req.insert("req".to_string(), Value::from("card.status"));
    req
}

#[test]
fn transact_parses_terminated_json() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    // Stray CR/LF noise ahead of the frame must be discarded.
    port.push_response(b"\r\n{\"connected\":true}\r\n");

    let rsp = conn.transact(&status_request()).unwrap();
    assert_eq!(rsp.get("connected"), Some(&Value::Bool(true)));
}

#[test]
fn request_frame_is_json_plus_one_terminator() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    port.clear_written(); // drop the open-time drain nudge

    port.push_response(b"{}\r\n");
    let req = status_request();
    conn.transact(&req).unwrap();

    let frame = port.written();
    assert!(frame.ends_with(b"\r\n"));
    let body = &frame[..frame.len() - 2];
    assert_eq!(body, serde_json::to_vec(&req).unwrap().as_slice());
    assert!(
        !body.windows(2).any(|w| w == b"\r\n"),
        "terminator must appear exactly once"
    );
}

#[test]
fn empty_object_response_is_empty_mapping() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{}\r\n");
    let rsp = conn.transact(&status_request()).unwrap();
    assert!(rsp.is_empty());
}

#[test]
fn missing_terminator_times_out() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    conn.config_mut().timeout_ms = 200;

    // Unterminated fragment, then silence.
    port.push_response(b"{\"incompl");

    let err = conn.transact(&status_request()).unwrap_err();
    assert_eq!(err, Error::Timeout);
}

#[test]
fn silent_device_times_out() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    conn.config_mut().timeout_ms = 200;

    let err = conn.transact(&status_request()).unwrap_err();
    assert_eq!(err, Error::Timeout);
}

#[test]
fn malformed_json_after_terminator_is_decode_fault() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"not json at all\r\n");

    let err = conn.transact(&status_request()).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn write_failure_is_io_fault() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.fail_writes("port gone");
    let err = conn.transact(&status_request()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn connection_survives_a_fault() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    conn.config_mut().timeout_ms = 200;

    assert_eq!(conn.transact(&status_request()).unwrap_err(), Error::Timeout);

    port.push_response(b"{\"usb\":true}\r\n");
    let rsp = conn.transact(&status_request()).unwrap();
    assert_eq!(rsp.get("usb"), Some(&Value::Bool(true)));
}

#[test]
fn identical_request_can_be_reissued() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    let req = status_request();

    port.push_response(b"{\"connected\":true}\r\n");
    let first = conn.transact(&req).unwrap();

    port.push_response(b"{\"connected\":true}\r\n");
    let second = conn.transact(&req).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.get("connected"), Some(&Value::Bool(true)));
}

#[test]
fn reset_discards_a_late_stale_reply() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());
    conn.config_mut().timeout_ms = 100;

    assert_eq!(conn.transact(&status_request()).unwrap_err(), Error::Timeout);

    // The reply to the timed-out command arrives late; drain it so the
    // next exchange starts on a clean line.
    port.push_response(b"{\"late\":true}\r\n");
    conn.reset().unwrap();

    port.push_response(b"{\"usb\":true}\r\n");
    let rsp = conn.transact(&status_request()).unwrap();
    assert_eq!(rsp.get("usb"), Some(&Value::Bool(true)));
    assert!(!rsp.contains_key("late"));
}

#[test]
fn error_field_in_response_is_data_not_fault() {
    let port = MockSerialPort::new();
    let mut conn = open_serial(port.clone(), MockClock::new());

    port.push_response(b"{\"err\":\"unknown request\"}\r\n");
    let rsp = conn.transact(&status_request()).unwrap();
    assert_eq!(rsp.get("err"), Some(&json!("unknown request")));
}
