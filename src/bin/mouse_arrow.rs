//! Blinking arrow that follows the cursor while a mouse button is held.
//!
//! The arrow is read from `arrow.png` in the working directory; a drawn
//! red triangle stands in when that file is missing. Escape quits.

use pointer_marks::{run_overlay, ArrowConfig, ArrowOverlay};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting arrow overlay...");
    log::info!("  - Hold any mouse button to show the arrow");
    log::info!("  - Exit: Escape");

    if let Err(e) = run_overlay(Box::new(ArrowOverlay::new(ArrowConfig::default()))) {
        log::error!("{e}");
        return Err(e.into());
    }
    Ok(())
}
