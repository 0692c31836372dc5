//! Headless player walkthrough.
//!
//! Drives one player through a full visibility cycle and a scrub gesture
//! using the desktop adapters, with logging enabled.
//!
//! Run with:
//! ```bash
//! cargo run -p core-service --example desktop_player
//!
//! # Pre-stop release, JSON logs
//! cargo run -p core-service --example desktop_player -- pre json
//! ```

use bridge_traits::log::LogLevel;
use bridge_traits::LifecyclePhase;
use core_runtime::config::{PlayerConfig, ReleasePolicy};
use core_runtime::events::ControlEvent;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::{bootstrap_desktop, Result};
use std::env;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let policy = match args.get(1).map(String::as_str) {
        Some("pre") => ReleasePolicy::PreStopRelease,
        _ => ReleasePolicy::PostStopRelease,
    };
    let format = match args.get(2).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    };

    init_logging(
        LoggingConfig::default()
            .with_format(format)
            .with_level(LogLevel::Debug),
    )?;

    let config = PlayerConfig::builder()
        .media_uri("https://cdn.example.com/videos/trailer.mp4?Signature=demo")
        .release_policy(policy)
        .build()?;
    let player = bootstrap_desktop(config)?;
    let listener = player.spawn_control_listener()?;

    player.on_phase(LifecyclePhase::Start)?;
    player.on_phase(LifecyclePhase::Resume)?;
    tokio::time::sleep(Duration::from_millis(250)).await;

    player.on_scrub_start();
    player.on_scrub_move(Duration::from_secs(12));
    if let Some(request) = player.load_preview(Duration::from_secs(12), Duration::from_secs(90))
    {
        info!(frame_time_us = request.frame_time_us, "Preview requested");
    }
    if let Some(resolution) = player.next_preview().await {
        info!(?resolution, "Preview resolved");
    }
    player.on_scrub_stop();

    player.handle_control(ControlEvent::Pause);
    player.on_phase(LifecyclePhase::Pause)?;
    player.on_phase(LifecyclePhase::Stop)?;
    info!(state = ?player.playback_state(), "Stored state after stop");

    player.on_phase(LifecyclePhase::Start)?;
    info!(live = ?player.live_state(), "Restored engine");

    player.shutdown();
    drop(player);
    let _ = listener.await;
    Ok(())
}
