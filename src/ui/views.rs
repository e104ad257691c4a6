//! Render models for the two screens
//!
//! Views are plain data built from state; `Display` draws them as text and
//! serde serialises them for `--json` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown under the confirm layout; notification settings live outside the demo
pub const NOTIFICATION_NOTICE: &str =
    "Turn on vehicle operation notifications to be told when a remote operation completes.";

/// Remote-control action offered on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAction {
    Hazard,
    AirConditioner,
    CarFinder,
}

impl RemoteAction {
    pub const ALL: [Self; 3] = [Self::Hazard, Self::AirConditioner, Self::CarFinder];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hazard => "Hazard lights",
            Self::AirConditioner => "Air conditioner",
            Self::CarFinder => "Car finder",
        }
    }

    /// Word typed to trigger the action
    pub fn command(self) -> &'static str {
        match self {
            Self::Hazard => "hazard",
            Self::AirConditioner => "aircon",
            Self::CarFinder => "finder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub vehicle_name: String,
    /// Range recorded at the last refuel, as displayed
    pub refuel_range_km: String,
    /// Total distance, as displayed
    pub odometer_km: String,
    pub alerts: Vec<String>,
    pub remote_actions: Vec<RemoteAction>,
}

/// One of the three mutually exclusive air conditioner layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Layout {
    /// Confirm starting with the current settings
    Confirm { startup_minutes: u8 },
    Requesting,
    Running {
        startup_minutes: u8,
        remaining_minutes: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirConditionerView {
    #[serde(flatten)]
    pub layout: Layout,
    pub banner: Option<String>,
    pub rendered_at: DateTime<Utc>,
}

/// Everything the terminal prints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Frame {
    Home(HomeView),
    AirConditioner(AirConditionerView),
}

impl Frame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home(view) => fmt::Display::fmt(view, f),
            Self::AirConditioner(view) => fmt::Display::fmt(view, f),
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.vehicle_name)?;
        writeln!(f, "  Range at last refuel: {} km", self.refuel_range_km)?;
        writeln!(f, "  Total distance:       {} km", self.odometer_km)?;
        for alert in &self.alerts {
            writeln!(f, "  [!] {}", alert)?;
        }
        writeln!(f, "Remote services")?;
        for action in &self.remote_actions {
            writeln!(f, "  - {:<16} ({})", action.label(), action.command())?;
        }
        Ok(())
    }
}

impl fmt::Display for AirConditionerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Air conditioner ==")?;
        if let Some(banner) = &self.banner {
            writeln!(f, "  [!] {}", banner)?;
        }
        match self.layout {
            Layout::Confirm { startup_minutes } => {
                writeln!(f, "  Start the air conditioner with these settings?")?;
                writeln!(f, "  Run time: {} min", startup_minutes)?;
                writeln!(f, "  > start   start with these settings")?;
                writeln!(f, "  > set N   change the run time")?;
                writeln!(f, "  > help    list commands")?;
                writeln!(f, "  Notification settings")?;
                writeln!(f, "  {}", NOTIFICATION_NOTICE)?;
            }
            Layout::Requesting => {
                writeln!(f, "  Requesting...")?;
                writeln!(f, "  Run time: --")?;
                writeln!(f, "  > stop")?;
            }
            Layout::Running {
                startup_minutes,
                remaining_minutes,
            } => {
                writeln!(f, "  Running with these settings")?;
                writeln!(f, "  Time until stop: {} min", remaining_minutes)?;
                writeln!(f, "  Run time: {} min", startup_minutes)?;
                writeln!(f, "  > stop")?;
            }
        }
        Ok(())
    }
}
