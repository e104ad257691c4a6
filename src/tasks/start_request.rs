//! Simulated start request task

use std::sync::{Arc, Weak};

use tokio::time::sleep;
use tracing::debug;

use super::countdown_task;
use crate::state::{ClimateControlState, Episode, Shared};

/// Wait out the request delay, then apply the simulated outcome
pub async fn simulated_request_task(shared: Weak<Shared>, episode: Episode) {
    let Some(delay) = shared.upgrade().map(|shared| shared.timings.request_delay) else {
        return;
    };

    sleep(delay).await;

    let Some(shared) = shared.upgrade() else {
        debug!("Controller dropped before start request completed");
        return;
    };

    let outcome = shared.simulator.outcome();
    debug!("Start request resolved: {:?}", outcome);

    let weak = Arc::downgrade(&shared);
    shared.update("complete start request", |core| {
        if !core.machine.complete_request(episode, outcome) {
            return;
        }
        core.request_task = None;
        if core.machine.state() == ClimateControlState::Running {
            core.countdown_task = Some(tokio::spawn(countdown_task(weak, episode)));
        }
    });
}
