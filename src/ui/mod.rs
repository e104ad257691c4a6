//! Display layer
//!
//! Screens are renderers: they read state, emit [`Frame`]s and forward user
//! actions to the controller. No climate logic lives here.

pub mod actions;
pub mod air_conditioner;
pub mod home;
pub mod navigation;
pub mod views;

// Re-export commonly used types
pub use actions::{UserAction, HELP};
pub use air_conditioner::{AirConditionerScreen, AirConditionerSettings};
pub use home::HomeScreen;
pub use navigation::{Flow, Navigator, Route};
pub use views::{AirConditionerView, Frame, HomeView, Layout, RemoteAction};
