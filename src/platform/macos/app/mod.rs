//! Window setup, the run loop and the overlay timer.

pub mod run;
pub mod state;

pub use run::run;
pub use state::{MacRuntimeState, STATE};
