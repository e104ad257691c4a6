//! Climate control state and configuration types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message published when a simulated start request fails
pub const START_FAILURE_MESSAGE: &str = "Failed to start the air conditioner";

/// Current phase of the air conditioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateControlState {
    /// Waiting for the user to confirm a start
    #[default]
    Idle,
    /// Start request in flight
    Requesting,
    /// Running and counting down
    Running,
}

impl fmt::Display for ClimateControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Running => "running",
        };
        f.write_str(name)
    }
}

/// How long the air conditioner runs once activated, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StartupMinutes(u8);

impl StartupMinutes {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 60;
    pub const DEFAULT: Self = Self(10);

    /// Validate a requested run time. Returns `None` outside 1..=60.
    pub fn new(minutes: i32) -> Option<Self> {
        let range = i32::from(Self::MIN)..=i32::from(Self::MAX);
        if range.contains(&minutes) {
            u8::try_from(minutes).ok().map(Self)
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Countdown value shown when a running episode begins
    pub fn initial_remaining(self) -> u8 {
        self.0 - 1
    }
}

impl Default for StartupMinutes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StartupMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a simulated start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Succeeded,
    Failed,
}
