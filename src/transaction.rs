//! Transaction engine — the single entry point for request/response
//! exchanges.
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────────────────┐
//! │ builder  │──▶│  codec   │──▶│ transport send/receive │
//! │ (request)│   │ (framing)│   │ (serial | i2c)         │
//! └──────────┘   └──────────┘   └───────────────────────┘
//! ```
//!
//! A [`Connection`] exclusively owns one transport handle. `transact`
//! takes `&mut self`, so at most one transaction is ever in flight per
//! connection — a host wanting concurrent commands uses one connection
//! per physical device. Sharing a single connection across execution
//! contexts requires external serialization (a mutex); interleaved
//! partial frames are undefined behavior on the wire.

use log::debug;

use crate::codec::{self, Request, Response};
use crate::config::TransactionConfig;
use crate::error::Result;
use crate::time::Clock;
use crate::transport::{I2c, I2cBus, Serial, SerialPort, Transport};

/// Exclusive owner of one transport handle.
pub struct Connection<T: Transport> {
    transport: T,
    config: TransactionConfig,
}

/// Open a connection over a serial port.
///
/// Drains stale bytes left on the line from a previous session; a drain
/// failure is logged, not fatal — the first transaction surfaces any
/// persistent fault.
pub fn open_serial<P: SerialPort, C: Clock>(port: P, clock: C) -> Connection<Serial<P, C>> {
    Connection::open(Serial::new(port, clock))
}

/// Open a connection to an I2C device at `address`.
///
/// `max_transfer` is the hardware-imposed per-transfer byte budget
/// negotiated for this bus; it caps the chunk size in both directions.
pub fn open_i2c<B: I2cBus, C: Clock>(
    bus: B,
    clock: C,
    address: u8,
    max_transfer: usize,
) -> Connection<I2c<B, C>> {
    Connection::open(I2c::new(bus, clock, address, max_transfer))
}

impl<T: Transport> Connection<T> {
    fn open(mut transport: T) -> Self {
        let config = TransactionConfig::default();
        if transport.check().is_ok() {
            if let Err(e) = transport.drain(&config) {
                debug!("open: stale-byte drain failed: {e}");
            }
        }
        Self { transport, config }
    }

    /// One request/response exchange.
    ///
    /// The sequence is encode → send → receive → decode under the
    /// configured timeout. The handle is validated before any I/O; an
    /// invalid handle is an Argument fault and the bus is never
    /// touched. A decode failure after a complete frame is fatal for
    /// this call (protocol desync) and is never retried. An
    /// error-indicator field inside a well-formed response is ordinary
    /// data and is returned as-is.
    ///
    /// Any surfaced fault aborts only this call; the connection remains
    /// usable afterwards.
    pub fn transact(&mut self, req: &Request) -> Result<Response> {
        self.transport.check()?;

        let frame = codec::encode_request(req)?;
        debug!("transact: {} byte request", frame.len());

        self.transport.send(&frame, &self.config)?;
        let raw = self.transport.receive(&self.config)?;

        codec::decode_response(&raw)
    }

    /// Discard stale bytes from an interrupted exchange.
    pub fn reset(&mut self) -> Result<()> {
        self.transport.check()?;
        self.transport.drain(&self.config)
    }

    /// Transaction timing/retry parameters.
    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    /// Mutable access for tuning deadlines before the next transaction.
    pub fn config_mut(&mut self) -> &mut TransactionConfig {
        &mut self.config
    }

    /// Consume the connection and give back the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
