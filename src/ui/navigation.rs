//! Back-stack navigation between the home and air conditioner screens

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{
    actions::UserAction,
    air_conditioner::{AirConditionerScreen, AirConditionerSettings},
    home::HomeScreen,
    views::{Frame, RemoteAction},
};
use crate::state::ClimateController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AirConditioner,
}

/// Whether the session should keep reading actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The host should show the command list
    Help,
    Quit,
}

/// Owns the back stack and whichever screen is currently shown.
///
/// The air conditioner screen exists only while it is on the stack, so
/// leaving it discards its state.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
    air_conditioner: Option<AirConditionerScreen>,
    settings: AirConditionerSettings,
    frames: mpsc::UnboundedSender<Frame>,
}

impl Navigator {
    /// Start on the home screen and render it
    pub fn new(settings: AirConditionerSettings, frames: mpsc::UnboundedSender<Frame>) -> Self {
        let navigator = Self {
            stack: vec![Route::Home],
            air_conditioner: None,
            settings,
            frames,
        };
        navigator.render_home();
        navigator
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    /// Controller of the open air conditioner screen, if any
    pub fn air_conditioner(&self) -> Option<&ClimateController> {
        self.air_conditioner.as_ref().map(AirConditionerScreen::controller)
    }

    pub fn navigate(&mut self, route: Route) {
        if self.current() == route {
            return;
        }

        info!("Navigating to {:?}", route);
        match route {
            Route::Home => {
                // Home is the root, so going there unwinds the stack
                while self.stack.len() > 1 {
                    self.pop();
                }
                self.render_home();
            }
            Route::AirConditioner => {
                self.stack.push(route);
                self.air_conditioner = Some(AirConditionerScreen::open(
                    &self.settings,
                    self.frames.clone(),
                ));
            }
        }
    }

    /// Pop the current screen. Returns false on the root screen.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }

        self.pop();
        if self.current() == Route::Home {
            self.render_home();
        }
        true
    }

    fn pop(&mut self) {
        if self.stack.pop() == Some(Route::AirConditioner) {
            self.air_conditioner = None;
        }
    }

    pub fn handle(&mut self, action: UserAction) -> Flow {
        match action {
            UserAction::Quit => return Flow::Quit,
            UserAction::Help => return Flow::Help,
            UserAction::Back => {
                if !self.back() {
                    info!("Already on the home screen");
                }
            }
            UserAction::Remote(RemoteAction::AirConditioner) => {
                self.navigate(Route::AirConditioner);
            }
            UserAction::Remote(other) => {
                info!("{} is not available in this demo", other.label());
            }
            UserAction::Start
            | UserAction::Stop
            | UserAction::SetStartupMinutes(_)
            | UserAction::ClearError => match self.shown_controller() {
                Some(controller) => match action {
                    UserAction::Start => controller.start(),
                    UserAction::Stop => controller.stop(),
                    UserAction::SetStartupMinutes(minutes) => {
                        controller.set_startup_minutes(minutes)
                    }
                    _ => controller.clear_error(),
                },
                None => warn!("Open the air conditioner screen first ('aircon')"),
            },
        }
        Flow::Continue
    }

    /// Controller of the screen currently on top, never one left behind
    fn shown_controller(&self) -> Option<&ClimateController> {
        if self.current() == Route::AirConditioner {
            self.air_conditioner()
        } else {
            None
        }
    }

    fn render_home(&self) {
        if self.frames.send(Frame::Home(HomeScreen.render())).is_err() {
            warn!("Frame receiver gone, home screen not rendered");
        }
    }
}
