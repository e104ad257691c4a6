//! Outcome source for simulated start requests

use std::{collections::VecDeque, fmt, sync::Mutex};

use tracing::warn;

use crate::state::RequestOutcome;

/// Decides how a simulated start request resolves once its delay elapses
pub trait RequestSimulator: Send + Sync + fmt::Debug {
    fn outcome(&self) -> RequestOutcome;
}

/// Every request succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl RequestSimulator for AlwaysSucceed {
    fn outcome(&self) -> RequestOutcome {
        RequestOutcome::Succeeded
    }
}

/// Every request fails
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl RequestSimulator for AlwaysFail {
    fn outcome(&self) -> RequestOutcome {
        RequestOutcome::Failed
    }
}

/// Replays queued outcomes in order, then succeeds
#[derive(Debug, Default)]
pub struct Scripted {
    outcomes: Mutex<VecDeque<RequestOutcome>>,
}

impl Scripted {
    pub fn new(outcomes: impl IntoIterator<Item = RequestOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

impl RequestSimulator for Scripted {
    fn outcome(&self) -> RequestOutcome {
        match self.outcomes.lock() {
            Ok(mut outcomes) => outcomes.pop_front().unwrap_or(RequestOutcome::Succeeded),
            Err(e) => {
                warn!("Failed to lock scripted outcomes: {}", e);
                RequestOutcome::Succeeded
            }
        }
    }
}
