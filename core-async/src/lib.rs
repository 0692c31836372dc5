//! Runtime-agnostic async abstraction layer for the preview player core.
//!
//! Every core crate spawns, sleeps and synchronizes through this crate instead
//! of reaching for Tokio directly, so the executor can be swapped in one place.
//!
//! # Modules
//!
//! - `task`: Task spawning and execution
//! - `time`: Sleep, timeouts, monotonic instants
//! - `sync`: Synchronization primitives, channels and cancellation tokens
//! - `runtime`: Runtime handles and a blocking bridge for sync call sites
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

pub use task::spawn;
pub use time::{sleep, Duration, Instant};
