//! Event handlers and dispatching.
//!
//! This module contains the dispatcher that applies events drained from
//! the event bus to the active overlay controller.

pub mod dispatcher;

pub use dispatcher::{dispatch_events, run_tick, DispatchOutcome};
