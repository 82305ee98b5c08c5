use std::{collections::BTreeMap, sync::Arc};

use chrono::Duration;
use parking_lot::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    constants::ACTIVE_SESSIONS_KEY,
    entities::analytics::{AnalyticsSnapshot, PageLoadResponse, PresenceUpdate},
    errors::{AppError, StorageError},
    repositories::storage::{JsonStorage, StorageRepository},
    use_cases::content::ContentStore,
    utils::clock::Clock,
};

/// Session id → last-seen time in epoch milliseconds. Entries older than
/// the window are dropped on every read and write.
pub struct PresenceTracker {
    sessions: Mutex<BTreeMap<String, i64>>,
    storage: Arc<dyn StorageRepository>,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl PresenceTracker {
    pub fn open(
        storage: Arc<dyn StorageRepository>,
        clock: Arc<dyn Clock>,
        window: Duration,
    ) -> Result<Self, StorageError> {
        let sessions = storage.load_json(ACTIVE_SESSIONS_KEY)?.unwrap_or_default();
        Ok(PresenceTracker {
            sessions: Mutex::new(sessions),
            storage,
            clock,
            window,
        })
    }

    /// Applies `change` to the pruned table, saves it and returns the live count.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, i64>, i64)) -> Result<u64, StorageError> {
        let now = self.clock.now().timestamp_millis();
        let cutoff = now - self.window.num_milliseconds();

        let mut sessions = self.sessions.lock();
        let mut draft = sessions.clone();
        draft.retain(|_, last_seen| *last_seen >= cutoff);
        change(&mut draft, now);

        if draft != *sessions {
            self.storage.save_json(ACTIVE_SESSIONS_KEY, &draft)?;
            *sessions = draft;
        }
        Ok(sessions.len() as u64)
    }

    pub fn touch(&self, session_id: &str) -> Result<u64, StorageError> {
        self.update(|sessions, now| {
            sessions.insert(session_id.to_string(), now);
        })
    }

    pub fn remove(&self, session_id: &str) -> Result<u64, StorageError> {
        self.update(|sessions, _| {
            sessions.remove(session_id);
        })
    }

    pub fn prune(&self) -> Result<u64, StorageError> {
        self.update(|_, _| {})
    }
}

/// Visit counting and the approximate live-visitor figure.
pub struct AnalyticsHandler {
    pub content: Arc<ContentStore>,
    pub presence: PresenceTracker,
}

impl AnalyticsHandler {
    pub fn new(content: Arc<ContentStore>, presence: PresenceTracker) -> Self {
        AnalyticsHandler { content, presence }
    }

    /// Counts a visit and opens a presence session for it.
    #[instrument(skip(self))]
    pub fn page_load(&self) -> Result<PageLoadResponse, AppError> {
        let session_id = Uuid::new_v4();
        let snapshot = self.content.record_visit()?;
        let online_users = self.presence.touch(&session_id.to_string())?;
        self.content.set_online_users(online_users)?;

        Ok(PageLoadResponse {
            session_id,
            site_visits: snapshot.site_visits,
            online_users,
        })
    }

    pub fn heartbeat(&self, session_id: Uuid) -> Result<PresenceUpdate, AppError> {
        let online_users = self.presence.touch(&session_id.to_string())?;
        self.publish(session_id, online_users)
    }

    /// Hidden tabs stop counting as online until they become visible again.
    pub fn visibility(&self, session_id: Uuid, visible: bool) -> Result<PresenceUpdate, AppError> {
        let key = session_id.to_string();
        let online_users = if visible {
            self.presence.touch(&key)?
        } else {
            self.presence.remove(&key)?
        };
        self.publish(session_id, online_users)
    }

    pub fn leave(&self, session_id: Uuid) -> Result<PresenceUpdate, AppError> {
        let online_users = self.presence.remove(&session_id.to_string())?;
        self.publish(session_id, online_users)
    }

    /// Periodic prune, run by the background presence task.
    pub fn refresh(&self) -> Result<u64, AppError> {
        let online_users = self.presence.prune()?;
        self.content.set_online_users(online_users)?;
        debug!(online_users, "Presence refreshed");
        Ok(online_users)
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.content.analytics()
    }

    fn publish(&self, session_id: Uuid, online_users: u64) -> Result<PresenceUpdate, AppError> {
        self.content.set_online_users(online_users)?;
        Ok(PresenceUpdate { session_id, online_users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::portfolio_data::PortfolioData,
        storage::memory_store::MemoryStore,
        utils::clock::ManualClock,
    };
    use chrono::{TimeZone, Utc};

    struct Fixture {
        clock: Arc<ManualClock>,
        storage: Arc<MemoryStore>,
        handler: AnalyticsHandler,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()));
        let storage = Arc::new(MemoryStore::new());

        let content = ContentStore::open(storage.clone(), clock.clone(), PortfolioData::default()).unwrap();
        let presence = PresenceTracker::open(storage.clone(), clock.clone(), Duration::minutes(5)).unwrap();

        Fixture {
            clock,
            storage,
            handler: AnalyticsHandler::new(Arc::new(content), presence),
        }
    }

    #[test]
    fn page_load_counts_visit_and_presence() {
        let f = fixture();

        let first = f.handler.page_load().unwrap();
        let second = f.handler.page_load().unwrap();

        assert_ne!(first.session_id, second.session_id);
        assert_eq!(second.site_visits, 2);
        assert_eq!(second.online_users, 2);
        assert_eq!(f.handler.snapshot().online_users, 2);
    }

    #[test]
    fn sessions_older_than_the_window_are_pruned() {
        let f = fixture();
        let stale = f.handler.page_load().unwrap();

        f.clock.advance(Duration::minutes(4));
        let fresh = f.handler.page_load().unwrap();
        assert_eq!(fresh.online_users, 2);

        f.clock.advance(Duration::seconds(61));
        assert_eq!(f.handler.refresh().unwrap(), 1);

        let saved: BTreeMap<String, i64> = f.storage.load_json(ACTIVE_SESSIONS_KEY).unwrap().unwrap();
        assert!(!saved.contains_key(&stale.session_id.to_string()));
        assert!(saved.contains_key(&fresh.session_id.to_string()));
    }

    #[test]
    fn heartbeats_keep_a_session_alive() {
        let f = fixture();
        let visit = f.handler.page_load().unwrap();

        for _ in 0..12 {
            f.clock.advance(Duration::seconds(30));
            f.handler.heartbeat(visit.session_id).unwrap();
        }

        assert_eq!(f.handler.refresh().unwrap(), 1);
    }

    #[test]
    fn hidden_and_departed_sessions_stop_counting() {
        let f = fixture();
        let a = f.handler.page_load().unwrap();
        let b = f.handler.page_load().unwrap();

        assert_eq!(f.handler.visibility(a.session_id, false).unwrap().online_users, 1);
        assert_eq!(f.handler.visibility(a.session_id, true).unwrap().online_users, 2);
        assert_eq!(f.handler.leave(b.session_id).unwrap().online_users, 1);
    }
}
