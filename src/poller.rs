//! Background profile sync driver.
//!
//! Fires a silent [`ProfileDirectory::sync`] on a fixed cadence. Each
//! tick spawns its own sync task, so a slow response never delays the
//! next tick; overlapping syncs resolve last-response-wins in the
//! directory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::directory::ProfileDirectory;
use crate::log_debug;

/// Handle for the polling task. Dropping it without calling
/// [`SyncPoller::stop`] leaves the task running detached.
pub struct SyncPoller {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SyncPoller {
    /// Starts polling. The first sync fires immediately, then one per
    /// `period` ([`crate::constants::DEFAULT_SYNC_INTERVAL`] for the
    /// standard cadence).
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(directory: Arc<ProfileDirectory>, period: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let dir = Arc::clone(&directory);
                        tokio::spawn(async move { dir.sync(true).await });
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }
            log_debug!("SYNC", "poller stopped");
        });

        Self { shutdown, handle }
    }

    /// Stops the polling task and waits for it to exit. Syncs already
    /// in flight still complete on their own.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
