//! Remote Services - a vehicle remote control demo
//!
//! A home screen with vehicle status and an air conditioner screen driven
//! by a simulated climate control state machine. Nothing talks to a real
//! vehicle: start requests and the countdown run on fixed timers.

pub mod config;
pub mod services;
pub mod state;
pub(crate) mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Timings};
pub use state::{ClimateControlState, ClimateController, StartupMinutes};
pub use ui::Navigator;
pub use utils::signals::shutdown_signal;
