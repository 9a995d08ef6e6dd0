//! Host-side JSON transaction link for companion peripherals.
//!
//! The peripheral speaks a single-command JSON protocol: one request
//! object out, one response object back, over either an asynchronous
//! serial line (CRLF-framed) or an I2C bus (length-prefixed chunks
//! under an exclusive lock). This crate implements the transaction
//! core — framing, chunking, arbitration, timeouts — behind one
//! `transact(request) -> response` contract, plus the fluent command
//! builders layered on top of it.
//!
//! ```no_run
//! # fn demo<P: notelink::SerialPort, C: notelink::Clock>(port: P, clock: C) -> notelink::Result<()> {
//! let mut card = notelink::open_serial(port, clock);
//! let rsp = notelink::commands::card::status(&mut card)?;
//! if rsp.get("connected").and_then(|v| v.as_bool()).unwrap_or(false) {
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Hardware access goes through two narrow port traits ([`SerialPort`],
//! [`I2cBus`]); `adapters` bridges them to `embedded-hal` and
//! `embedded-io` types.

#![no_std]
#![deny(unused_must_use)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod adapters;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod time;
pub mod transaction;
pub mod transport;

pub use codec::{Request, Response};
pub use config::TransactionConfig;
pub use error::{Error, Result};
pub use time::Clock;
#[cfg(feature = "std")]
pub use time::StdClock;
pub use transaction::{Connection, open_i2c, open_serial};
pub use transport::{I2cBus, SerialPort, Transport};
