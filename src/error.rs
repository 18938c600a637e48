//! Error type shared by the core and the platform backends.

use thiserror::Error;

/// Everything that can go wrong while bringing an overlay up or running it.
///
/// Only [`OverlayError::Icon`] is recovered from (the arrow falls back to a
/// drawn placeholder); every other variant ends the process.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A Win32, COM or Direct2D call failed.
    #[cfg(target_os = "windows")]
    #[error("Windows API call failed: {0}")]
    Windows(#[from] windows::core::Error),

    /// The overlay window could not be created.
    #[error("failed to create overlay window: {0}")]
    WindowCreation(String),

    /// The global mouse/keyboard hooks could not be installed.
    #[error("failed to install global input hook: {0}")]
    HookInstall(String),

    /// A worker thread could not be spawned.
    #[error("failed to spawn thread: {0}")]
    Thread(#[from] std::io::Error),

    /// `init_event_bus` was called twice in one process.
    #[error("event bus already initialized")]
    EventBusAlreadyInitialized,

    /// The arrow icon could not be read or decoded.
    #[error("failed to load arrow icon: {0}")]
    Icon(#[from] image::ImageError),

    /// There is no backend for the target operating system.
    #[error("{0} is not supported; pointer-marks runs on macOS and Windows")]
    UnsupportedPlatform(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_the_os() {
        let err = OverlayError::UnsupportedPlatform("linux");
        assert_eq!(
            err.to_string(),
            "linux is not supported; pointer-marks runs on macOS and Windows"
        );
    }

    #[test]
    fn io_errors_convert_into_thread_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "no threads left");
        let err: OverlayError = io.into();
        assert!(matches!(err, OverlayError::Thread(_)));
        assert!(err.to_string().contains("no threads left"));
    }
}
