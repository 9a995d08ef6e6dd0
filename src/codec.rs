//! JSON line codec.
//!
//! Wire format (both transports):
//! ```text
//! ┌──────────────────────────┬────────┐
//! │ UTF-8 JSON object (N B)  │ CR LF  │
//! └──────────────────────────┴────────┘
//! ```
//! No length prefix; exactly one request/response pair per line. The
//! accumulator consumes incoming bytes and yields the payload once the
//! terminator is observed. A single read may deliver part of the
//! payload, the terminator split across calls, or stray CR/LF noise
//! ahead of the frame — all are handled here so transports stay dumb.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Request mapping: command-name key plus explicitly supplied arguments.
pub type Request = Map<String, Value>;

/// Response mapping decoded from one JSON object.
pub type Response = Map<String, Value>;

/// Frame terminator appended to every encoded request.
pub const TERMINATOR: &[u8] = b"\r\n";

/// Maximum accumulated frame size (protects against memory exhaustion).
pub const MAX_FRAME_SIZE: usize = 16 * 1024;

/// Serialize a request to wire bytes: canonical JSON plus one terminator.
pub fn encode_request(req: &Request) -> Result<Vec<u8>> {
    let mut frame = serde_json::to_vec(req)
        .map_err(|e| Error::decode(format_args!("request encode: {e}")))?;
    frame.extend_from_slice(TERMINATOR);
    Ok(frame)
}

/// Decode a complete frame payload into a response mapping.
///
/// Surrounding ASCII whitespace is tolerated; anything else that is not
/// one JSON object is a decode fault.
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::decode(format_args!("response JSON: {e}")))
}

/// Streaming terminator scanner.
///
/// Feeds arbitrary byte slices and yields the frame payload (terminator
/// stripped) once CRLF is observed. Blank lines — stray CR/LF noise the
/// peripheral emits ahead of a frame — are discarded silently.
pub struct LineAccumulator {
    buf: Vec<u8>,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed bytes into the accumulator.
    ///
    /// Returns `Ok(Some(payload))` when a complete non-blank frame is
    /// available. Bytes following the terminator within `data` are not
    /// consumed by the caller's contract — one frame per exchange.
    pub fn feed(&mut self, data: &[u8]) -> Result<Option<Vec<u8>>> {
        for &byte in data {
            if self.buf.len() >= MAX_FRAME_SIZE {
                self.buf.clear();
                return Err(Error::decode(format_args!(
                    "frame exceeds {MAX_FRAME_SIZE} bytes without terminator"
                )));
            }
            self.buf.push(byte);

            if self.buf.ends_with(TERMINATOR) {
                self.buf.truncate(self.buf.len() - TERMINATOR.len());
                let line = mem::take(&mut self.buf);
                if line.iter().all(u8::is_ascii_whitespace) {
                    // Noise ahead of the frame; keep scanning.
                    continue;
                }
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Discard any partial frame (e.g. before reusing a connection).
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Whether a partial frame is buffered.
    pub fn is_partial(&self) -> bool {
        !self.buf.is_empty()
    }
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────
