//! Fuzz target: `decode_response`
//!
//! Arbitrary bytes must either decode into a mapping or surface a
//! Decode fault — never panic.
//!
//! cargo fuzz run fuzz_decode_response

#![no_main]

use libfuzzer_sys::fuzz_target;
use notelink::codec::decode_response;

fuzz_target!(|data: &[u8]| {
    let _ = decode_response(data);
});
