//! Unified error types for the transaction link.
//!
//! A single `Error` enum that every layer converts into, keeping the
//! caller's error handling uniform across transports. Transport
//! implementations carry their own associated error types; those are
//! rendered into a bounded detail string at the point of conversion so
//! the crate error stays independent of the concrete port.

use core::fmt;

/// Bounded detail buffer for faults that carry context from a foreign
/// transport error.
pub type Detail = heapless::String<96>;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The connection is not a valid, opened transport handle.
    Argument(&'static str),
    /// No complete response frame was observed within the timeout budget.
    Timeout,
    /// Received bytes were not valid JSON after a complete frame.
    Decode(Detail),
    /// The I2C bus lock could not be acquired within the retry budget.
    BusBusy,
    /// The underlying transport read or write failed.
    Io(Detail),
}

impl Error {
    /// Build an [`Error::Decode`] with formatted context.
    pub(crate) fn decode(args: fmt::Arguments<'_>) -> Self {
        Self::Decode(detail(args))
    }

    /// Build an [`Error::Io`] with formatted context.
    pub(crate) fn io(args: fmt::Arguments<'_>) -> Self {
        Self::Io(detail(args))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument(msg) => write!(f, "invalid connection: {msg}"),
            Self::Timeout => write!(f, "timed out awaiting response"),
            Self::Decode(d) => write!(f, "decode: {d}"),
            Self::BusBusy => write!(f, "I2C bus busy"),
            Self::Io(d) => write!(f, "io: {d}"),
        }
    }
}

/// Render format arguments into a bounded buffer, truncating on overflow.
fn detail(args: fmt::Arguments<'_>) -> Detail {
    let mut buf = Detail::new();
    let _ = fmt::Write::write_fmt(&mut buf, args);
    buf
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
