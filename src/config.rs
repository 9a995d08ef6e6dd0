//! Transaction timing and retry parameters.
//!
//! All tunable parameters for one connection. Defaults are generous on
//! the response deadline because peripheral command processing latency
//! is significant (seconds-scale for network-touching commands).

/// Per-connection transaction configuration.
#[derive(Debug, Clone)]
pub struct TransactionConfig {
    // --- Deadlines ---
    /// Overall budget for one send/receive exchange (milliseconds).
    pub timeout_ms: u32,
    /// Pause between polls while the response has not started arriving
    /// (milliseconds).
    pub poll_interval_ms: u32,

    // --- I2C pacing ---
    /// Settle delay between consecutive outbound chunks (milliseconds).
    pub chunk_delay_ms: u32,
    /// Backoff after a transient bus fault (NACK) before retrying
    /// (milliseconds).
    pub retry_backoff_ms: u32,

    // --- I2C bus arbitration ---
    /// Lock acquisition attempts before surfacing `BusBusy`.
    pub lock_attempts: u32,
    /// Backoff between lock acquisition attempts (milliseconds).
    pub lock_backoff_ms: u32,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            // Deadlines
            timeout_ms: 30_000,
            poll_interval_ms: 10,

            // I2C pacing
            chunk_delay_ms: 1,
            retry_backoff_ms: 25,

            // Bus arbitration
            lock_attempts: 50,
            lock_backoff_ms: 10,
        }
    }
}
