//! Time-related abstractions.
//!
//! Sleep, timeouts and monotonic instants backed by `tokio::time`, plus a few
//! wall-clock helpers.
//!
//! # Examples
//!
//! ```rust
//! use core_async::time::{timeout, Duration};
//!
//! async fn example() {
//!     let result = timeout(Duration::from_millis(50), async { 7 }).await;
//!     assert_eq!(result.unwrap(), 7);
//! }
//! ```

pub use tokio::time::{error::Elapsed, interval, sleep, sleep_until, timeout, Interval, Sleep, Timeout};

pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or `0` if the system clock is before it.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
