//! I2C transport & chunking.
//!
//! Outbound frames are split into length-prefixed chunks no larger than
//! the negotiated maximum transfer size:
//! ```text
//! ┌────────────┬──────────────────────┐
//! │ Length (1B)│ payload (≤ max, 255) │
//! └────────────┴──────────────────────┘
//! ```
//! Reception polls the device for its pending byte count (`[0x00, 0x00]`
//! → `[available, 0]`), then reads chunks (`[0x00, n]` → `[available',
//! returned, data…]`) until the payload ends with the terminator and
//! nothing is pending. Chunk boundaries are invisible above this module:
//! the reassembled bytes equal a single-shot serial exchange.
//!
//! Every chunked send/receive runs under the exclusive bus lock, and the
//! lock is released on every exit path, fault paths included.

use alloc::vec::Vec;

use log::{debug, trace, warn};

use crate::codec::MAX_FRAME_SIZE;
use crate::config::TransactionConfig;
use crate::error::{Error, Result};
use crate::time::{Clock, Deadline};
use crate::transport::{Transport, private::Sealed};

/// Largest payload a single length-prefixed transfer can carry.
const MAX_CHUNK: usize = 255;

/// I2C bus master with cooperative arbitration.
///
/// `try_lock`/`unlock` arbitrate the bus against other users sharing the
/// handle (another task, a second master). Buses that are exclusively
/// owned can grant the lock unconditionally — see
/// [`crate::adapters::HalI2cBus`].
pub trait I2cBus {
    /// Error type for bus operations. A write error is a NACK as far as
    /// this transport is concerned: absent or sleeping device.
    type Error: core::fmt::Debug;

    /// Write `data` to the device at `address`.
    fn write(&mut self, address: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;

    /// Write `tx` then read `rx.len()` bytes in one transaction
    /// (repeated start).
    fn write_read(
        &mut self,
        address: u8,
        tx: &[u8],
        rx: &mut [u8],
    ) -> core::result::Result<(), Self::Error>;

    /// Attempt to take exclusive bus ownership. `false` means busy.
    fn try_lock(&mut self) -> bool;

    /// Release bus ownership taken by a successful `try_lock`.
    fn unlock(&mut self);
}

/// I2C transport: chunked JSON exchange with one target address.
pub struct I2c<B: I2cBus, C: Clock> {
    bus: B,
    clock: C,
    address: u8,
    max_transfer: usize,
}

impl<B: I2cBus, C: Clock> I2c<B, C> {
    pub fn new(bus: B, clock: C, address: u8, max_transfer: usize) -> Self {
        Self {
            bus,
            clock,
            address,
            max_transfer,
        }
    }

    /// Give back the bus and clock.
    pub fn into_parts(self) -> (B, C) {
        (self.bus, self.clock)
    }

    fn chunk_cap(&self) -> usize {
        self.max_transfer.min(MAX_CHUNK)
    }

    /// Acquire the bus lock, retrying with backoff. `BusBusy` only after
    /// the attempt budget is spent — a single miss never surfaces.
    fn acquire_lock(&mut self, cfg: &TransactionConfig) -> Result<()> {
        for attempt in 0..cfg.lock_attempts {
            if self.bus.try_lock() {
                return Ok(());
            }
            if attempt + 1 < cfg.lock_attempts {
                self.clock.delay_ms(cfg.lock_backoff_ms);
            }
        }
        warn!(
            "i2c: bus lock not acquired after {} attempts",
            cfg.lock_attempts
        );
        Err(Error::BusBusy)
    }

    fn query_available(&mut self) -> core::result::Result<usize, B::Error> {
        let mut hdr = [0u8; 2];
        self.bus.write_read(self.address, &[0x00, 0x00], &mut hdr)?;
        Ok(hdr[0] as usize)
    }

    fn send_locked(&mut self, frame: &[u8], cfg: &TransactionConfig) -> Result<()> {
        let deadline = Deadline::after(&mut self.clock, cfg.timeout_ms);
        let chunk_cap = self.chunk_cap();
        let mut tx = [0u8; 1 + MAX_CHUNK];
        let mut offset = 0;

        trace!("i2c: tx {} bytes, chunk cap {}", frame.len(), chunk_cap);
        while offset < frame.len() {
            let end = (offset + chunk_cap).min(frame.len());
            let chunk = &frame[offset..end];
            tx[0] = chunk.len() as u8;
            tx[1..=chunk.len()].copy_from_slice(chunk);

            match self.bus.write(self.address, &tx[..=chunk.len()]) {
                Ok(()) => {
                    offset = end;
                    self.clock.delay_ms(cfg.chunk_delay_ms);
                }
                Err(e) => {
                    // No ACK — device absent or still waking. Retry
                    // until the overall budget runs out.
                    if deadline.expired(&mut self.clock) {
                        return Err(Error::io(format_args!("i2c write: {e:?}")));
                    }
                    debug!("i2c: write not acknowledged, retrying");
                    self.clock.delay_ms(cfg.retry_backoff_ms);
                }
            }
        }
        Ok(())
    }

    fn receive_locked(&mut self, cfg: &TransactionConfig) -> Result<Vec<u8>> {
        let deadline = Deadline::after(&mut self.clock, cfg.timeout_ms);
        let chunk_cap = self.chunk_cap();
        let mut payload: Vec<u8> = Vec::new();
        let mut rx = [0u8; 2 + MAX_CHUNK];

        loop {
            let available = match self.query_available() {
                Ok(n) => n,
                Err(e) => {
                    if deadline.expired(&mut self.clock) {
                        return Err(Error::io(format_args!("i2c query: {e:?}")));
                    }
                    debug!("i2c: count query not acknowledged, retrying");
                    self.clock.delay_ms(cfg.retry_backoff_ms);
                    continue;
                }
            };

            if available == 0 {
                if payload.ends_with(b"\n") {
                    trace!("i2c: rx {} bytes", payload.len());
                    return Ok(payload);
                }
                if deadline.expired(&mut self.clock) {
                    return Err(Error::Timeout);
                }
                self.clock.delay_ms(cfg.poll_interval_ms);
                continue;
            }

            let want = available.min(chunk_cap);
            if let Err(e) =
                self.bus
                    .write_read(self.address, &[0x00, want as u8], &mut rx[..2 + want])
            {
                if deadline.expired(&mut self.clock) {
                    return Err(Error::io(format_args!("i2c read: {e:?}")));
                }
                debug!("i2c: chunk read not acknowledged, retrying");
                self.clock.delay_ms(cfg.retry_backoff_ms);
                continue;
            }

            let returned = rx[1] as usize;
            if returned > want {
                return Err(Error::io(format_args!(
                    "i2c chunk returned {returned} bytes for a {want}-byte request"
                )));
            }
            if payload.len() + returned > MAX_FRAME_SIZE {
                return Err(Error::decode(format_args!(
                    "frame exceeds {MAX_FRAME_SIZE} bytes without terminator"
                )));
            }
            payload.extend_from_slice(&rx[2..2 + returned]);

            // A short grant means the device is still producing; an
            // empty one is "busy, try again" and must pace itself so
            // the deadline stays live.
            if returned == 0 {
                if deadline.expired(&mut self.clock) {
                    return Err(Error::Timeout);
                }
                self.clock.delay_ms(cfg.poll_interval_ms);
            }
        }
    }

    fn drain_locked(&mut self, cfg: &TransactionConfig) -> Result<()> {
        let chunk_cap = self.chunk_cap();
        let mut rx = [0u8; 2 + MAX_CHUNK];
        for _ in 0..64 {
            let available = match self.query_available() {
                Ok(n) => n,
                // An absent or sleeping device has nothing to drain.
                Err(_) => break,
            };
            if available == 0 {
                break;
            }
            let want = available.min(chunk_cap);
            if self
                .bus
                .write_read(self.address, &[0x00, want as u8], &mut rx[..2 + want])
                .is_err()
            {
                break;
            }
            self.clock.delay_ms(cfg.chunk_delay_ms);
        }
        Ok(())
    }
}

impl<B: I2cBus, C: Clock> Sealed for I2c<B, C> {}

impl<B: I2cBus, C: Clock> Transport for I2c<B, C> {
    fn check(&self) -> Result<()> {
        if self.address == 0 || self.address > 0x7F {
            return Err(Error::Argument("I2C address outside the 7-bit range"));
        }
        if self.max_transfer == 0 {
            return Err(Error::Argument("I2C max transfer size is zero"));
        }
        Ok(())
    }

    fn send(&mut self, frame: &[u8], cfg: &TransactionConfig) -> Result<()> {
        self.acquire_lock(cfg)?;
        let result = self.send_locked(frame, cfg);
        self.bus.unlock();
        result
    }

    fn receive(&mut self, cfg: &TransactionConfig) -> Result<Vec<u8>> {
        self.acquire_lock(cfg)?;
        let result = self.receive_locked(cfg);
        self.bus.unlock();
        result
    }

    fn drain(&mut self, cfg: &TransactionConfig) -> Result<()> {
        self.acquire_lock(cfg)?;
        let result = self.drain_locked(cfg);
        self.bus.unlock();
        result
    }
}

// ── Tests ────────────────────────────────────────────────────
