//! Window setup, the message loop and the timer tick.

pub mod run;
pub mod state;

pub use run::run;
pub use state::{WindowsRuntimeState, STATE};
