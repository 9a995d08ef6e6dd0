//! Fuzz target: `LineAccumulator::feed`
//!
//! Drives arbitrary byte sequences into the streaming terminator
//! scanner and asserts that it never panics, never yields a payload
//! over the frame-size cap, and accepts bytes cleanly after a reset.
//!
//! cargo fuzz run fuzz_line_accumulator

#![no_main]

use libfuzzer_sys::fuzz_target;
use notelink::codec::{LineAccumulator, MAX_FRAME_SIZE};

fuzz_target!(|data: &[u8]| {
    let mut acc = LineAccumulator::new();

    if let Ok(Some(payload)) = acc.feed(data) {
        assert!(payload.len() <= MAX_FRAME_SIZE, "payload exceeds frame cap");
        assert!(
            !payload.iter().all(u8::is_ascii_whitespace),
            "blank lines must be discarded, not yielded"
        );
    }

    // After a reset the accumulator must accept bytes cleanly again.
    acc.reset();
    let _ = acc.feed(data);
});
