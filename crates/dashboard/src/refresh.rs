use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::dashboard::Dashboard;

/// Handle to the periodic background refresh task.
///
/// Dropping the handle cancels the task, matching the lifetime of the view
/// that started it.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub(crate) fn spawn(dashboard: Dashboard, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut interval_timer = time::interval(period);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval_timer.tick().await;

            let mut iteration = 0u64;
            loop {
                interval_timer.tick().await;
                iteration += 1;

                let apys_moved = dashboard.background_tick().await;
                log::debug!(
                    "Background refresh {}: {}",
                    iteration,
                    if apys_moved { "APYs updated" } else { "portfolio growth only" }
                );
            }
        });

        log::info!("Background refresh started every {}s", period.as_secs());
        Self { task }
    }

    /// Cancel the refresh loop
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            log::info!("Background refresh stopped");
        }
        self.task.abort();
    }
}
