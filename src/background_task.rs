use std::time::Duration;

use actix_web::web;
use tokio::{task::JoinHandle, time::{interval, MissedTickBehavior}};

use crate::AppState;

/// Prunes stale presence sessions and republishes the live visitor count
/// every `period`, mirroring the client heartbeat.
pub async fn start_presence_task(state: web::Data<AppState>, period: Duration) {
    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.analytics_handler.refresh() {
            Ok(online) => tracing::debug!("Presence refreshed, {} online", online),
            Err(e) => tracing::error!("Presence refresh failed: {}", e)
        }
    }
}

/// Spawns [`start_presence_task`]; abort the handle on shutdown.
pub fn spawn_presence_task(state: web::Data<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(start_presence_task(state, period))
}
