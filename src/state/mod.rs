//! State management module
//! 
//! The climate control state machine and the controller that publishes it
//! to the screen.

pub mod climate_state;
pub mod controller;
pub mod machine;

// Re-export main types
pub use climate_state::{ClimateControlState, RequestOutcome, StartupMinutes, START_FAILURE_MESSAGE};
pub use controller::{ClimateController, WeakClimateController};
pub use machine::{ClimateMachine, ClimateSnapshot, Episode, TickOutcome};

pub(crate) use controller::Shared;
