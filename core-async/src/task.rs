//! Task spawning and execution abstractions.
//!
//! Backed by Tokio: `spawn` returns an awaitable [`JoinHandle`], and
//! `spawn_blocking` moves CPU-heavy work (frame decoding) onto the blocking
//! pool.
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//!
//! async fn example() {
//!     let handle = task::spawn(async { 42 });
//!     assert_eq!(handle.await.unwrap(), 42);
//!
//!     let decoded = task::spawn_blocking(|| vec![0u8; 16]).await.unwrap();
//!     assert_eq!(decoded.len(), 16);
//! }
//! ```

pub use tokio::task::{spawn_blocking, yield_now, AbortHandle, JoinError, JoinHandle};

/// Spawns a new asynchronous task on the current runtime.
///
/// The spawned task may run on a different thread.
///
/// # Panics
///
/// Panics when called outside of a runtime context.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}

/// Result type for task operations.
pub type Result<T> = std::result::Result<T, JoinError>;
