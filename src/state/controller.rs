//! Observable state holder for the air conditioner screen

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error};

use super::{ClimateControlState, ClimateMachine, ClimateSnapshot, StartupMinutes};
use crate::{
    config::Timings,
    services::{AlwaysSucceed, RequestSimulator},
    tasks::simulated_request_task,
};

/// The machine plus the timers currently driving it
#[derive(Debug)]
pub(crate) struct Core {
    pub(crate) machine: ClimateMachine,
    pub(crate) request_task: Option<JoinHandle<()>>,
    pub(crate) countdown_task: Option<JoinHandle<()>>,
}

impl Core {
    fn abort_timers(&mut self) {
        if let Some(task) = self.request_task.take() {
            task.abort();
        }
        if let Some(task) = self.countdown_task.take() {
            task.abort();
        }
    }
}

impl Drop for Core {
    fn drop(&mut self) {
        self.abort_timers();
    }
}

/// State shared between the controller and its timer tasks
#[derive(Debug)]
pub(crate) struct Shared {
    core: Mutex<Core>,
    state_tx: watch::Sender<ClimateControlState>,
    remaining_tx: watch::Sender<u8>,
    startup_tx: watch::Sender<StartupMinutes>,
    error_tx: watch::Sender<Option<String>>,
    pub(crate) timings: Timings,
    pub(crate) simulator: Arc<dyn RequestSimulator>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Core>, String> {
        self.core
            .lock()
            .map_err(|e| format!("Failed to lock climate state: {}", e))
    }

    /// Apply an update under the lock and notify watchers of whatever changed
    pub(crate) fn update<F, R>(&self, action: &str, updater: F) -> Option<R>
    where
        F: FnOnce(&mut Core) -> R,
    {
        let mut core = match self.lock() {
            Ok(core) => core,
            Err(e) => {
                error!("Cannot {}: {}", action, e);
                return None;
            }
        };

        let result = updater(&mut core);
        self.publish(&core.machine);
        Some(result)
    }

    fn publish(&self, machine: &ClimateMachine) {
        self.state_tx
            .send_if_modified(|state| replace_if_changed(state, machine.state()));
        self.remaining_tx
            .send_if_modified(|remaining| replace_if_changed(remaining, machine.remaining_minutes()));
        self.startup_tx
            .send_if_modified(|startup| replace_if_changed(startup, machine.startup_minutes()));
        self.error_tx.send_if_modified(|error| {
            replace_if_changed(error, machine.error().map(str::to_owned))
        });
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Owns the climate control state machine and exposes it as watch channels.
///
/// Commands never fail from the caller's point of view: redundant calls are
/// ignored and a failed start shows up on the [`error`](Self::error)
/// channel. Timer tasks are spawned onto the current Tokio runtime, so
/// `start` must be called from within one. Dropping the controller aborts
/// its timers and closes every channel.
#[derive(Debug)]
pub struct ClimateController {
    shared: Arc<Shared>,
}

impl ClimateController {
    pub fn new(
        startup_minutes: StartupMinutes,
        timings: Timings,
        simulator: Arc<dyn RequestSimulator>,
    ) -> Self {
        let machine = ClimateMachine::new(startup_minutes);
        let (state_tx, _) = watch::channel(machine.state());
        let (remaining_tx, _) = watch::channel(machine.remaining_minutes());
        let (startup_tx, _) = watch::channel(machine.startup_minutes());
        let (error_tx, _) = watch::channel(None);

        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    machine,
                    request_task: None,
                    countdown_task: None,
                }),
                state_tx,
                remaining_tx,
                startup_tx,
                error_tx,
                timings,
                simulator,
            }),
        }
    }

    pub fn state(&self) -> watch::Receiver<ClimateControlState> {
        self.shared.state_tx.subscribe()
    }

    /// Minutes until the air conditioner stops; only meaningful while running
    pub fn remaining_minutes(&self) -> watch::Receiver<u8> {
        self.shared.remaining_tx.subscribe()
    }

    pub fn startup_minutes(&self) -> watch::Receiver<StartupMinutes> {
        self.shared.startup_tx.subscribe()
    }

    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.shared.error_tx.subscribe()
    }

    pub fn snapshot(&self) -> ClimateSnapshot {
        ClimateSnapshot {
            state: *self.shared.state_tx.borrow(),
            startup_minutes: *self.shared.startup_tx.borrow(),
            remaining_minutes: *self.shared.remaining_tx.borrow(),
            error: self.shared.error_tx.borrow().clone(),
        }
    }

    pub fn timings(&self) -> Timings {
        self.shared.timings
    }

    /// Begin a simulated start request. Ignored unless idle.
    pub fn start(&self) {
        let weak = Arc::downgrade(&self.shared);
        self.shared.update("start air conditioner", |core| {
            if let Some(episode) = core.machine.start() {
                debug!("Scheduling start request");
                core.request_task = Some(tokio::spawn(simulated_request_task(weak, episode)));
            }
        });
    }

    /// Return to idle, abandoning any pending request or countdown
    pub fn stop(&self) {
        self.shared.update("stop air conditioner", |core| {
            if core.machine.stop() {
                core.abort_timers();
            }
        });
    }

    /// Change the run time; values outside 1..=60 are ignored
    pub fn set_startup_minutes(&self, minutes: i32) {
        self.shared.update("set startup time", |core| {
            core.machine.set_startup_minutes(minutes);
        });
    }

    pub fn clear_error(&self) {
        self.shared.update("clear error", |core| {
            core.machine.clear_error();
        });
    }

    /// Handle for tasks that must not keep the controller alive
    pub fn downgrade(&self) -> WeakClimateController {
        WeakClimateController {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl Default for ClimateController {
    fn default() -> Self {
        Self::new(
            StartupMinutes::default(),
            Timings::default(),
            Arc::new(AlwaysSucceed),
        )
    }
}

/// Non-owning reference to a [`ClimateController`]
#[derive(Debug, Clone)]
pub struct WeakClimateController {
    shared: Weak<Shared>,
}

impl WeakClimateController {
    pub fn upgrade(&self) -> Option<ClimateController> {
        self.shared.upgrade().map(|shared| ClimateController { shared })
    }
}
