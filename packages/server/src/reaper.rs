//! Room reaper: periodic eviction of empty, idle rooms.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::store::ChatStore;

/// Spawn the reaper task.
///
/// Every `interval` the store is swept for rooms that are empty and idle
/// past the configured timeout. The sweep shares the store lock with request
/// handling, so it can never delete a room a concurrent join just entered.
/// The task runs for the server's lifetime; one sweep's problems never stop
/// the next.
pub fn spawn(store: Arc<ChatStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick of a tokio interval fires immediately; skip it so
        // the first sweep happens one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = store.sweep_idle_rooms().await;
            if removed.is_empty() {
                tracing::debug!("Reaper sweep: nothing to remove");
            } else {
                for name in &removed {
                    tracing::info!("Reaper removed idle room '{}'", name);
                }
            }
        }
    })
}
