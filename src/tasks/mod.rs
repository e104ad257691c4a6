//! Background tasks module
//! 
//! Timer tasks that drive the climate control state machine. Each one holds
//! only a weak reference to the controller and re-checks its episode when
//! the delay elapses.

pub mod countdown;
pub mod start_request;

// Re-export main functions
pub use countdown::countdown_task;
pub use start_request::simulated_request_task;
