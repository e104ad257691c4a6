//! Countdown background task

use std::sync::Weak;

use tokio::time::sleep;
use tracing::debug;

use crate::state::{Episode, Shared, TickOutcome};

/// Decrement the remaining minutes once per tick until the episode ends
pub async fn countdown_task(shared: Weak<Shared>, episode: Episode) {
    let Some(period) = shared.upgrade().map(|shared| shared.timings.tick_interval) else {
        return;
    };

    loop {
        sleep(period).await;

        let Some(shared) = shared.upgrade() else {
            return;
        };

        match shared.update("apply countdown tick", |core| core.machine.tick(episode)) {
            Some(TickOutcome::Counting(remaining)) => {
                debug!("Countdown tick, {} min remaining", remaining);
            }
            Some(TickOutcome::Exhausted) => {
                shared.update("finish countdown", |core| {
                    if core.machine.expire(episode) {
                        core.countdown_task = None;
                    }
                });
                return;
            }
            Some(TickOutcome::Stale) | None => {
                debug!("Countdown superseded, exiting");
                return;
            }
        }
    }
}
