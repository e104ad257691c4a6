//! Home screen with vehicle status and the remote services menu

use super::views::{HomeView, RemoteAction};

const VEHICLE_NAME: &str = "Harrier Hybrid";
const REFUEL_RANGE_KM: &str = "146";
const ODOMETER_KM: &str = "6,395";
const AUTO_ALARM_OFF: &str = "Auto alarm is OFF";

/// Stateless; every render shows the same demo vehicle
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeScreen;

impl HomeScreen {
    pub fn render(&self) -> HomeView {
        HomeView {
            vehicle_name: VEHICLE_NAME.to_string(),
            refuel_range_km: REFUEL_RANGE_KM.to_string(),
            odometer_km: ODOMETER_KM.to_string(),
            alerts: vec![AUTO_ALARM_OFF.to_string()],
            remote_actions: RemoteAction::ALL.to_vec(),
        }
    }
}
