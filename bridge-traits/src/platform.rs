//! Helper marker traits used to keep bridge trait bounds in one place.
//!
//! Engines live on the control thread but are moved into it once, so they
//! only need `Send`. Listeners, loaders and notifiers are shared across tasks
//! and need `Send + Sync`.

/// Marker trait for capabilities shared across tasks.
pub trait PlatformSendSync: Send + Sync {}

impl<T> PlatformSendSync for T where T: Send + Sync {}

/// Marker trait for capabilities owned by a single task at a time.
pub trait PlatformSend: Send {}

impl<T> PlatformSend for T where T: Send {}
