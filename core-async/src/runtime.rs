//! Runtime utilities that abstract over the underlying async executor.
//!
//! Downstream crates use these wrappers so they never depend on Tokio
//! directly.

pub use tokio::runtime::{Builder, Handle, Runtime};

/// Runs the provided future to completion on a throwaway current-thread
/// runtime.
///
/// Only meant for sync call sites outside of any runtime; calling it from
/// inside a Tokio worker panics.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: std::future::Future,
{
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}

/// Returns `true` when called from within a Tokio runtime context.
pub fn in_runtime() -> bool {
    Handle::try_current().is_ok()
}
