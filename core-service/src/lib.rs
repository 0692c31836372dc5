//! Player service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (engine factory,
//! thumbnail loader, preview target, user notifier) into the playback core
//! and exposes one thread-safe [`PlayerService`] to the host UI. Desktop apps
//! typically enable the `desktop-shims` feature (which depends on
//! `bridge-desktop`) to get headless defaults for every capability.

pub mod error;
mod service;

pub use error::{CoreError, Result};
pub use service::PlayerService;

use std::sync::Arc;

use bridge_traits::{EngineFactory, PreviewTarget, ThumbnailLoader, UserNotifier};

/// Aggregated handle to all bridge dependencies the player requires.
#[derive(Clone)]
pub struct PlayerDependencies {
    pub engine_factory: Arc<dyn EngineFactory>,
    pub thumbnail_loader: Arc<dyn ThumbnailLoader>,
    pub preview_target: Arc<dyn PreviewTarget>,
    pub notifier: Arc<dyn UserNotifier>,
}

impl PlayerDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(
        engine_factory: Arc<dyn EngineFactory>,
        thumbnail_loader: Arc<dyn ThumbnailLoader>,
        preview_target: Arc<dyn PreviewTarget>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            engine_factory,
            thumbnail_loader,
            preview_target,
            notifier,
        }
    }

    /// Start a bundle piece by piece; [`PlayerDependenciesBuilder::build`]
    /// reports the first capability left unset.
    pub fn builder() -> PlayerDependenciesBuilder {
        PlayerDependenciesBuilder::default()
    }

    /// Headless desktop adapters for every capability.
    #[cfg(feature = "desktop-shims")]
    pub fn desktop() -> Self {
        use bridge_desktop::{
            BlankFrameLoader, HeadlessEngineFactory, TracingNotifier, TracingPreviewTarget,
        };

        Self::new(
            Arc::new(HeadlessEngineFactory::new()),
            Arc::new(BlankFrameLoader::default()),
            Arc::new(TracingPreviewTarget::new()),
            Arc::new(TracingNotifier::new()),
        )
    }
}

/// Builder for [`PlayerDependencies`].
#[derive(Default)]
pub struct PlayerDependenciesBuilder {
    engine_factory: Option<Arc<dyn EngineFactory>>,
    thumbnail_loader: Option<Arc<dyn ThumbnailLoader>>,
    preview_target: Option<Arc<dyn PreviewTarget>>,
    notifier: Option<Arc<dyn UserNotifier>>,
}

impl PlayerDependenciesBuilder {
    pub fn engine_factory(mut self, factory: Arc<dyn EngineFactory>) -> Self {
        self.engine_factory = Some(factory);
        self
    }

    pub fn thumbnail_loader(mut self, loader: Arc<dyn ThumbnailLoader>) -> Self {
        self.thumbnail_loader = Some(loader);
        self
    }

    pub fn preview_target(mut self, target: Arc<dyn PreviewTarget>) -> Self {
        self.preview_target = Some(target);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn UserNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<PlayerDependencies> {
        Ok(PlayerDependencies {
            engine_factory: self
                .engine_factory
                .ok_or_else(|| missing("EngineFactory"))?,
            thumbnail_loader: self
                .thumbnail_loader
                .ok_or_else(|| missing("ThumbnailLoader"))?,
            preview_target: self
                .preview_target
                .ok_or_else(|| missing("PreviewTarget"))?,
            notifier: self.notifier.ok_or_else(|| missing("UserNotifier"))?,
        })
    }
}

fn missing(capability: &str) -> CoreError {
    CoreError::CapabilityMissing {
        capability: capability.to_string(),
        message: "No implementation was provided by the host".to_string(),
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// ```
/// # #[cfg(feature = "desktop-shims")]
/// # fn example() -> core_service::Result<()> {
/// use core_runtime::config::PlayerConfig;
/// use core_service::bootstrap_desktop;
///
/// let config = PlayerConfig::builder()
///     .media_uri("https://cdn.example.com/clip.mp4")
///     .build()?;
/// let player = bootstrap_desktop(config)?;
/// assert!(!player.is_live());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(config: core_runtime::config::PlayerConfig) -> Result<PlayerService> {
    PlayerService::new(config, PlayerDependencies::desktop())
}
