//! # Tally poller
//!
//! Cancellable background refresh tied to the dashboard's lifetime.
//!
//! Started explicitly with [`start`], stopped explicitly with
//! [`PollerHandle::stop`]. Stop joins the task, so once it returns no further
//! fetch can fire. A failed poll is logged and swallowed; the next tick
//! retries.
use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::warn;

use crate::controller::Controller;

pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Spawns the refresh loop. The first fetch happens immediately, then one
/// per `period`, plus one whenever the controller requests an out-of-band
/// refresh after an accepted vote.
pub fn start(controller: Arc<Controller>, period: Duration) -> PollerHandle {
    let (stop, mut stopped) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = controller.refresh_requested() => {}
                _ = stopped.changed() => break,
            }

            if let Err(error) = controller.refresh_tally().await {
                warn!("Tally refresh failed: {error}");
            }
        }
    });

    PollerHandle { stop, task }
}

impl PollerHandle {
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}
