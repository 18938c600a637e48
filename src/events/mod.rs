//! Event system carrying input from the hooks to the UI thread.
//!
//! Global mouse hooks run on a different thread (Windows) or inside AppKit
//! callbacks (macOS). Neither may touch overlay state directly, so they only
//! publish [`OverlayEvent`] records. The UI thread drains the queue on every
//! timer tick and feeds it to the active overlay controller.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │ Mouse hook  │     │  Key hook   │
//! │ (LL / NSEv) │     │  (Escape)   │
//! └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()
//!        ▼                   ▼
//! ┌─────────────────────────────────────┐
//! │              EventBus               │
//! │            (mpsc channel)           │
//! └─────────────────┬───────────────────┘
//!                   │ drain()
//!                   ▼
//! ┌─────────────────────────────────────┐
//! │             Dispatcher              │
//! │       (UI thread, timer tick)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`OverlayEvent`, `InputEvent`)
//! - [`bus`]: `EventBus` and `EventPublisher` types
//! - [`global`]: Static access functions

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish};
pub use types::{InputEvent, InputKind, MouseButton, OverlayEvent};
