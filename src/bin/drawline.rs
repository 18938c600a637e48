//! Press-and-hold line marker.
//!
//! Hold any mouse button still for a moment and a red line grows under the
//! cursor. Release to leave it blinking; press on it to drag it; move away
//! quickly to dismiss it. Escape quits.

use pointer_marks::{run_overlay, LineConfig, LineOverlay};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting line overlay...");
    log::info!("  - Hold a mouse button without moving to draw");
    log::info!("  - Press on a blinking line to drag it");
    log::info!("  - Exit: Escape");

    if let Err(e) = run_overlay(Box::new(LineOverlay::new(LineConfig::default()))) {
        log::error!("{e}");
        return Err(e.into());
    }
    Ok(())
}
