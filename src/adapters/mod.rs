//! Adapters — bridges from ecosystem HAL traits to the crate's ports.
//!
//! | Adapter        | Implements   | Wraps                                   |
//! |----------------|--------------|------------------------------------------|
//! | `HalI2cBus`    | `I2cBus`     | any `embedded_hal::i2c::I2c` bus        |
//! | `IoSerialPort` | `SerialPort` | any `embedded_io` Read+Write+ReadReady  |
//!
//! The core transports only ever see the port traits, so a platform
//! with a native lockable bus (a shared-bus mutex, a multi-master
//! controller) can skip these and implement the ports directly.

use crate::transport::{I2cBus, SerialPort};

/// [`I2cBus`] over an owned `embedded-hal` 1.0 bus.
///
/// An owned bus is exclusive by construction, so the arbitration lock
/// is granted unconditionally.
pub struct HalI2cBus<B> {
    bus: B,
}

impl<B> HalI2cBus<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: embedded_hal::i2c::I2c> I2cBus for HalI2cBus<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn write_read(&mut self, address: u8, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(address, tx, rx)
    }

    fn try_lock(&mut self) -> bool {
        true
    }

    fn unlock(&mut self) {}
}

/// [`SerialPort`] over an `embedded-io` byte stream.
///
/// `read_ready` supplies the non-blocking "no data yet" contract: a
/// not-ready port reads as zero bytes instead of blocking the poll
/// loop past its deadline checks.
pub struct IoSerialPort<P> {
    port: P,
}

impl<P> IoSerialPort<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P> SerialPort for IoSerialPort<P>
where
    P: embedded_io::Read + embedded_io::Write + embedded_io::ReadReady,
{
    type Error = P::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.port.read_ready()? {
            return Ok(0);
        }
        self.port.read(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.port.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

// ── Tests ────────────────────────────────────────────────────
