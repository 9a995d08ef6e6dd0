//! Serial transport & framing.
//!
//! Sends the CRLF-terminated frame in one write; reads one byte at a
//! time into the line accumulator until the terminator appears. A read
//! yielding zero bytes means "not yet available" — the loop delays and
//! retries until the deadline, it never treats it as end-of-stream.

use alloc::vec::Vec;

use log::{debug, trace};

use crate::codec::LineAccumulator;
use crate::config::TransactionConfig;
use crate::error::{Error, Result};
use crate::time::{Clock, Deadline};
use crate::transport::{Transport, private::Sealed};

/// Byte-oriented serial port.
///
/// Concrete implementations: a UART driver, a USB CDC endpoint, or the
/// [`crate::adapters::IoSerialPort`] bridge over `embedded-io`.
pub trait SerialPort {
    /// Error type for this port.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available yet (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;

    /// Write `data` to the port. Returns the number of bytes written.
    fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Serial transport: one CRLF-framed JSON exchange per transaction.
pub struct Serial<P: SerialPort, C: Clock> {
    port: P,
    clock: C,
}

impl<P: SerialPort, C: Clock> Serial<P, C> {
    pub fn new(port: P, clock: C) -> Self {
        Self { port, clock }
    }

    /// Give back the port and clock.
    pub fn into_parts(self) -> (P, C) {
        (self.port, self.clock)
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let n = self
                .port
                .write(data)
                .map_err(|e| Error::io(format_args!("serial write: {e:?}")))?;
            if n == 0 {
                return Err(Error::io(format_args!("serial write accepted 0 bytes")));
            }
            data = &data[n..];
        }
        self.port
            .flush()
            .map_err(|e| Error::io(format_args!("serial flush: {e:?}")))
    }
}

impl<P: SerialPort, C: Clock> Sealed for Serial<P, C> {}

impl<P: SerialPort, C: Clock> Transport for Serial<P, C> {
    fn check(&self) -> Result<()> {
        // A byte-stream descriptor has no dynamically invalid states.
        Ok(())
    }

    fn send(&mut self, frame: &[u8], _cfg: &TransactionConfig) -> Result<()> {
        trace!("serial: tx {} bytes", frame.len());
        self.write_all(frame)
    }

    fn receive(&mut self, cfg: &TransactionConfig) -> Result<Vec<u8>> {
        let deadline = Deadline::after(&mut self.clock, cfg.timeout_ms);
        let mut acc = LineAccumulator::new();
        let mut byte = [0u8; 1];

        loop {
            let n = self
                .port
                .read(&mut byte)
                .map_err(|e| Error::io(format_args!("serial read: {e:?}")))?;

            if n == 0 {
                if deadline.expired(&mut self.clock) {
                    debug!("serial: no terminator within {} ms", cfg.timeout_ms);
                    return Err(Error::Timeout);
                }
                self.clock.delay_ms(cfg.poll_interval_ms);
                continue;
            }

            if let Some(line) = acc.feed(&byte[..n])? {
                trace!("serial: rx {} bytes", line.len());
                return Ok(line);
            }

            // Data is flowing but unterminated; the deadline still binds.
            if deadline.expired(&mut self.clock) {
                return Err(Error::Timeout);
            }
        }
    }

    fn drain(&mut self, cfg: &TransactionConfig) -> Result<()> {
        // Nudge the peripheral to flush any partial line, then discard
        // everything until the port goes quiet.
        self.write_all(b"\n")?;

        let mut scratch = [0u8; 32];
        let mut quiet = 0u8;
        for _ in 0..256 {
            let n = self
                .port
                .read(&mut scratch)
                .map_err(|e| Error::io(format_args!("serial drain: {e:?}")))?;
            if n == 0 {
                quiet += 1;
                if quiet >= 3 {
                    break;
                }
                self.clock.delay_ms(cfg.poll_interval_ms);
            } else {
                quiet = 0;
            }
        }
        Ok(())
    }
}
