//! Climate control state machine
//!
//! The machine is synchronous and owns no timers. Timer tasks report back
//! with the [`Episode`] that scheduled them; `start` and `stop` advance the
//! episode, so a delayed effect belonging to an operation the user already
//! left is discarded when it finally fires.

use tracing::{debug, info, warn};

use super::{ClimateControlState, RequestOutcome, StartupMinutes, START_FAILURE_MESSAGE};

/// Generation of start/stop operations a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Episode(u64);

impl Episode {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Consistent copy of everything the screen observes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateSnapshot {
    pub state: ClimateControlState,
    pub startup_minutes: StartupMinutes,
    pub remaining_minutes: u8,
    pub error: Option<String>,
}

/// Result of applying one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belongs to an episode that is no longer running
    Stale,
    /// Still running with this many minutes left
    Counting(u8),
    /// Remaining reached zero; call [`ClimateMachine::expire`]
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct ClimateMachine {
    state: ClimateControlState,
    startup_minutes: StartupMinutes,
    remaining_minutes: u8,
    error: Option<String>,
    episode: Episode,
}

impl ClimateMachine {
    pub fn new(startup_minutes: StartupMinutes) -> Self {
        Self {
            state: ClimateControlState::Idle,
            startup_minutes,
            remaining_minutes: startup_minutes.initial_remaining(),
            error: None,
            episode: Episode::default(),
        }
    }

    pub fn state(&self) -> ClimateControlState {
        self.state
    }

    pub fn startup_minutes(&self) -> StartupMinutes {
        self.startup_minutes
    }

    pub fn remaining_minutes(&self) -> u8 {
        self.remaining_minutes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn episode(&self) -> Episode {
        self.episode
    }

    pub fn snapshot(&self) -> ClimateSnapshot {
        ClimateSnapshot {
            state: self.state,
            startup_minutes: self.startup_minutes,
            remaining_minutes: self.remaining_minutes,
            error: self.error.clone(),
        }
    }

    /// Idle -> Requesting. Returns the episode the request timer must carry,
    /// or `None` when the machine is not idle.
    pub fn start(&mut self) -> Option<Episode> {
        if self.state != ClimateControlState::Idle {
            debug!("Ignoring start while {}", self.state);
            return None;
        }

        self.episode = self.episode.next();
        self.state = ClimateControlState::Requesting;
        self.error = None;
        info!("Air conditioner start requested ({} min)", self.startup_minutes);
        Some(self.episode)
    }

    /// Requesting/Running -> Idle. Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        if self.state == ClimateControlState::Idle {
            debug!("Ignoring stop while idle");
            return false;
        }

        info!("Stopping air conditioner (was {})", self.state);
        self.episode = self.episode.next();
        self.state = ClimateControlState::Idle;
        self.error = None;
        self.remaining_minutes = self.startup_minutes.initial_remaining();
        true
    }

    /// Apply the result of the simulated request scheduled for `episode`
    pub fn complete_request(&mut self, episode: Episode, outcome: RequestOutcome) -> bool {
        if episode != self.episode || self.state != ClimateControlState::Requesting {
            debug!("Discarding stale start request result");
            return false;
        }

        match outcome {
            RequestOutcome::Succeeded => {
                self.state = ClimateControlState::Running;
                self.remaining_minutes = self.startup_minutes.initial_remaining();
                info!(
                    "Air conditioner running, {} min until stop",
                    self.remaining_minutes
                );
            }
            RequestOutcome::Failed => {
                warn!("{}", START_FAILURE_MESSAGE);
                self.state = ClimateControlState::Idle;
                self.error = Some(START_FAILURE_MESSAGE.to_string());
            }
        }
        true
    }

    /// Decrement the countdown for `episode`
    pub fn tick(&mut self, episode: Episode) -> TickOutcome {
        if episode != self.episode || self.state != ClimateControlState::Running {
            return TickOutcome::Stale;
        }

        self.remaining_minutes = self.remaining_minutes.saturating_sub(1);
        if self.remaining_minutes == 0 {
            TickOutcome::Exhausted
        } else {
            TickOutcome::Counting(self.remaining_minutes)
        }
    }

    /// Running with nothing left -> Idle, resetting the displayed countdown
    pub fn expire(&mut self, episode: Episode) -> bool {
        if episode != self.episode
            || self.state != ClimateControlState::Running
            || self.remaining_minutes != 0
        {
            return false;
        }

        info!("Countdown finished, air conditioner stopped");
        self.state = ClimateControlState::Idle;
        self.remaining_minutes = self.startup_minutes.initial_remaining();
        true
    }

    /// Change the run time. Values outside 1..=60 are ignored. An active
    /// countdown keeps its remaining time.
    pub fn set_startup_minutes(&mut self, minutes: i32) -> bool {
        let Some(startup_minutes) = StartupMinutes::new(minutes) else {
            debug!("Rejected startup time of {} min", minutes);
            return false;
        };

        self.startup_minutes = startup_minutes;
        if self.state != ClimateControlState::Running {
            self.remaining_minutes = startup_minutes.initial_remaining();
        }
        info!("Startup time set to {} min", startup_minutes);
        true
    }

    pub fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}

impl Default for ClimateMachine {
    fn default() -> Self {
        Self::new(StartupMinutes::default())
    }
}
