//! Transport abstraction — the capability behind `transact`.
//!
//! Exactly two transports speak the protocol: asynchronous serial and
//! I2C. The set is sealed; the engine is generic over [`Transport`], so
//! the transaction logic never learns which bus it is on, and no
//! foreign implementation can slip an unframed channel under it.
//!
//! Each transport moves one complete frame per call. Chunking, bus
//! arbitration, and terminator scanning live entirely below this trait:
//! the decoded response is identical whichever transport carried it.

use alloc::vec::Vec;

use crate::config::TransactionConfig;
use crate::error::Result;

pub mod i2c;
pub mod serial;

pub use i2c::{I2c, I2cBus};
pub use serial::{Serial, SerialPort};

pub(crate) mod private {
    /// Seals [`super::Transport`] to the crate's transport variants.
    pub trait Sealed {}
}

/// One complete frame out, one complete frame in.
pub trait Transport: private::Sealed {
    /// Validate the handle. Runs at the `transact` boundary before any
    /// I/O; an invalid handle is an Argument fault.
    fn check(&self) -> Result<()>;

    /// Write one encoded, terminated frame.
    fn send(&mut self, frame: &[u8], cfg: &TransactionConfig) -> Result<()>;

    /// Read until one complete frame has been observed, or the timeout
    /// budget is exhausted.
    fn receive(&mut self, cfg: &TransactionConfig) -> Result<Vec<u8>>;

    /// Discard stale bytes left over from an earlier exchange.
    fn drain(&mut self, cfg: &TransactionConfig) -> Result<()>;
}
