//! Global access to the overlay event bus.
//!
//! Hook callbacks are plain `extern "system"` functions (or Objective-C
//! blocks) with no user data pointer, so they reach the bus through a static.
//! The bus is initialized once at startup via `init_event_bus()`, after which
//! any thread can call `publish()` and the UI thread calls `drain_events()`.
//!
//! # Design
//!
//! - `EventPublisher` is `Send + Sync` and shared as is
//! - `EventBus` owns the receiver and sits behind a `Mutex`; only the UI
//!   thread locks it

use std::sync::{Mutex, OnceLock};

use super::bus::{EventBus, EventPublisher};
use super::types::OverlayEvent;
use crate::error::{OverlayError, Result};

struct GlobalBus {
    publisher: EventPublisher,
    bus: Mutex<EventBus>,
}

static GLOBAL: OnceLock<GlobalBus> = OnceLock::new();

/// Initialize the global event bus.
///
/// Must be called once at startup, before any hook is installed. A second
/// call returns [`OverlayError::EventBusAlreadyInitialized`].
pub fn init_event_bus() -> Result<()> {
    let bus = EventBus::new();
    let publisher = bus.publisher();

    GLOBAL
        .set(GlobalBus {
            publisher,
            bus: Mutex::new(bus),
        })
        .map_err(|_| OverlayError::EventBusAlreadyInitialized)?;

    log::debug!("event bus initialized");
    Ok(())
}

/// Publish an event to the global event bus.
///
/// Events published before initialization are dropped: a hook can fire
/// between installation and the first tick, and there is nobody to tell yet.
pub fn publish(event: OverlayEvent) {
    if let Some(global) = GLOBAL.get() {
        global.publisher.publish(event);
    }
}

/// Drain all pending events from the global event bus, oldest first.
///
/// Returns an empty list before initialization.
pub fn drain_events() -> Vec<OverlayEvent> {
    let Some(global) = GLOBAL.get() else {
        return Vec::new();
    };

    // A panic while holding the lock cannot leave the receiver inconsistent.
    let bus = global
        .bus
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    bus.drain()
}
