//! Monotonic time and cooperative delays.
//!
//! Receive loops enforce deadlines by elapsed-time checks, never by
//! preemptive cancellation: once a request has been written the
//! peripheral has accepted it, so the engine commits to awaiting a
//! response or timing out. The delay half of the trait is the loop's
//! suspension point — implementations should yield to their scheduler
//! (or sleep the thread) rather than spin.

use embedded_hal::delay::DelayNs;

/// Monotonic clock with a cooperative delay.
///
/// `now_ms` must be monotonic for the lifetime of the connection; the
/// epoch is arbitrary. The `DelayNs` supertrait supplies `delay_ms`
/// used for poll pacing and retry backoff.
pub trait Clock: DelayNs {
    /// Milliseconds since an arbitrary fixed epoch (monotonic).
    fn now_ms(&mut self) -> u64;
}

/// Absolute deadline derived from a [`Clock`] and a budget.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    end_ms: u64,
}

impl Deadline {
    /// Deadline `timeout_ms` from now.
    pub fn after(clock: &mut impl Clock, timeout_ms: u32) -> Self {
        Self {
            end_ms: clock.now_ms().saturating_add(u64::from(timeout_ms)),
        }
    }

    /// Whether the budget is spent.
    pub fn expired(&self, clock: &mut impl Clock) -> bool {
        clock.now_ms() >= self.end_ms
    }
}

/// Host clock backed by `std::time::Instant` and `std::thread::sleep`.
#[cfg(feature = "std")]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl DelayNs for StdClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
