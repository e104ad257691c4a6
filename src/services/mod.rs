//! Simulated external services
//!
//! Nothing here talks to a vehicle. The simulator decides how a start
//! request resolves so tests and the demo can exercise the failure path.

pub mod simulation;

// Re-export main types
pub use simulation::{AlwaysFail, AlwaysSucceed, RequestSimulator, Scripted};
