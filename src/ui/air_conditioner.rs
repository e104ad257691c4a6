//! Air conditioner screen
//!
//! The screen owns the [`ClimateController`] for as long as it is shown and
//! runs a render task that turns every published change into a [`Frame`].
//! Error banners are dismissed by the render task once they have been
//! visible for [`Timings::error_display`].

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use super::views::{AirConditionerView, Frame, Layout};
use crate::{
    config::Timings,
    services::{AlwaysSucceed, RequestSimulator},
    state::{
        ClimateControlState, ClimateController, ClimateSnapshot, StartupMinutes,
        WeakClimateController,
    },
};

/// What every newly opened air conditioner screen starts with
#[derive(Debug, Clone)]
pub struct AirConditionerSettings {
    pub startup_minutes: StartupMinutes,
    pub timings: Timings,
    pub simulator: Arc<dyn RequestSimulator>,
}

impl Default for AirConditionerSettings {
    fn default() -> Self {
        Self {
            startup_minutes: StartupMinutes::default(),
            timings: Timings::default(),
            simulator: Arc::new(AlwaysSucceed),
        }
    }
}

#[derive(Debug)]
pub struct AirConditionerScreen {
    controller: ClimateController,
    render_task: JoinHandle<()>,
}

impl AirConditionerScreen {
    /// Create the controller and start rendering into `frames`.
    /// Must be called from within a Tokio runtime.
    pub fn open(settings: &AirConditionerSettings, frames: mpsc::UnboundedSender<Frame>) -> Self {
        let controller = ClimateController::new(
            settings.startup_minutes,
            settings.timings,
            Arc::clone(&settings.simulator),
        );

        let observed = Observed {
            state: controller.state(),
            remaining: controller.remaining_minutes(),
            startup: controller.startup_minutes(),
            error: controller.error(),
        };
        let render_task = tokio::spawn(render_loop(
            observed,
            controller.downgrade(),
            settings.timings.error_display,
            frames,
        ));

        info!("Air conditioner screen opened");
        Self {
            controller,
            render_task,
        }
    }

    pub fn controller(&self) -> &ClimateController {
        &self.controller
    }
}

impl Drop for AirConditionerScreen {
    fn drop(&mut self) {
        self.render_task.abort();
        info!("Air conditioner screen closed");
    }
}

/// Build the view for a state snapshot
pub fn view(snapshot: &ClimateSnapshot) -> AirConditionerView {
    let layout = match snapshot.state {
        ClimateControlState::Idle => Layout::Confirm {
            startup_minutes: snapshot.startup_minutes.get(),
        },
        ClimateControlState::Requesting => Layout::Requesting,
        ClimateControlState::Running => Layout::Running {
            startup_minutes: snapshot.startup_minutes.get(),
            remaining_minutes: snapshot.remaining_minutes,
        },
    };

    AirConditionerView {
        layout,
        banner: snapshot.error.clone(),
        rendered_at: Utc::now(),
    }
}

struct Observed {
    state: watch::Receiver<ClimateControlState>,
    remaining: watch::Receiver<u8>,
    startup: watch::Receiver<StartupMinutes>,
    error: watch::Receiver<Option<String>>,
}

impl Observed {
    fn snapshot(&mut self) -> ClimateSnapshot {
        ClimateSnapshot {
            state: *self.state.borrow_and_update(),
            remaining_minutes: *self.remaining.borrow_and_update(),
            startup_minutes: *self.startup.borrow_and_update(),
            error: self.error.borrow_and_update().clone(),
        }
    }
}

async fn render_loop(
    mut observed: Observed,
    controller: WeakClimateController,
    error_display: Duration,
    frames: mpsc::UnboundedSender<Frame>,
) {
    let mut shown_error: Option<String> = None;
    let mut dismiss_at: Option<Instant> = None;

    loop {
        let snapshot = observed.snapshot();
        if snapshot.error != shown_error {
            dismiss_at = snapshot
                .error
                .is_some()
                .then(|| Instant::now() + error_display);
            shown_error = snapshot.error.clone();
        }

        if frames.send(Frame::AirConditioner(view(&snapshot))).is_err() {
            debug!("Frame receiver gone, stopping air conditioner render task");
            return;
        }

        tokio::select! {
            changed = observed.state.changed() => {
                if changed.is_err() { return; }
            }
            changed = observed.remaining.changed() => {
                if changed.is_err() { return; }
            }
            changed = observed.startup.changed() => {
                if changed.is_err() { return; }
            }
            changed = observed.error.changed() => {
                if changed.is_err() { return; }
            }
            _ = sleep_until(dismiss_at.unwrap_or_else(Instant::now)), if dismiss_at.is_some() => {
                dismiss_at = None;
                if let Some(controller) = controller.upgrade() {
                    debug!("Dismissing error banner");
                    controller.clear_error();
                }
            }
        }
    }
}
