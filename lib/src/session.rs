// lib/src/session.rs

//! Per-browser session state. Each session owns its three disease histories;
//! nothing is shared between sessions and nothing is written to disk.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use models::{Disease, DiseaseHistory};

use crate::config::SessionConfig;

pub type SessionId = Uuid;

#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    diabetes: DiseaseHistory,
    heart: DiseaseHistory,
    kidney: DiseaseHistory,
}

impl Session {
    pub fn new(id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            diabetes: DiseaseHistory::new(Disease::Diabetes),
            heart: DiseaseHistory::new(Disease::Heart),
            kidney: DiseaseHistory::new(Disease::Kidney),
        }
    }

    pub fn history(&self, disease: Disease) -> &DiseaseHistory {
        match disease {
            Disease::Diabetes => &self.diabetes,
            Disease::Heart => &self.heart,
            Disease::Kidney => &self.kidney,
        }
    }

    pub fn history_mut(&mut self, disease: Disease) -> &mut DiseaseHistory {
        match disease {
            Disease::Diabetes => &mut self.diabetes,
            Disease::Heart => &mut self.heart,
            Disease::Kidney => &mut self.kidney,
        }
    }
}

#[derive(Debug)]
struct SessionSlot {
    last_seen: DateTime<Utc>,
    session: Arc<Mutex<Session>>,
}

/// Live sessions plus an index ordered by last use, so expiry and
/// eviction take the oldest entries without scanning the map.
#[derive(Debug, Default)]
struct SessionTable {
    slots: HashMap<SessionId, SessionSlot>,
    by_last_seen: BTreeSet<(DateTime<Utc>, SessionId)>,
}

impl SessionTable {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn insert(&mut self, id: SessionId, slot: SessionSlot) {
        self.by_last_seen.insert((slot.last_seen, id));
        if let Some(old) = self.slots.insert(id, slot) {
            self.by_last_seen.remove(&(old.last_seen, id));
        }
    }

    fn touch(&mut self, id: SessionId, now: DateTime<Utc>) -> Option<Arc<Mutex<Session>>> {
        let slot = self.slots.get_mut(&id)?;
        self.by_last_seen.remove(&(slot.last_seen, id));
        slot.last_seen = now;
        self.by_last_seen.insert((now, id));
        Some(Arc::clone(&slot.session))
    }

    fn remove(&mut self, id: SessionId) -> bool {
        match self.slots.remove(&id) {
            Some(slot) => {
                self.by_last_seen.remove(&(slot.last_seen, id));
                true
            }
            None => false,
        }
    }

    fn pop_oldest(&mut self) -> Option<SessionId> {
        let (_, id) = self.by_last_seen.pop_first()?;
        self.slots.remove(&id);
        Some(id)
    }

    /// Drops sessions idle for longer than `idle_timeout` at `now`.
    fn expire(&mut self, now: DateTime<Utc>, idle_timeout: Duration) -> usize {
        let mut expired = 0;
        while let Some(&(last_seen, id)) = self.by_last_seen.first() {
            if now.signed_duration_since(last_seen) <= idle_timeout {
                break;
            }
            self.by_last_seen.remove(&(last_seen, id));
            self.slots.remove(&id);
            expired += 1;
        }
        expired
    }
}

/// A session looked up or created by `SessionStore::open`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: SessionId,
    /// True when the requested id was absent, unknown or expired.
    pub created: bool,
    pub session: Arc<Mutex<Session>>,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<SessionTable>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        let idle_secs = i64::try_from(config.idle_timeout_secs).unwrap_or(i64::MAX);
        Self {
            sessions: Mutex::new(SessionTable::default()),
            idle_timeout: Duration::try_seconds(idle_secs).unwrap_or(Duration::MAX),
            max_sessions: config.max_sessions.max(1),
        }
    }

    pub async fn open(&self, requested: Option<SessionId>) -> SessionHandle {
        self.open_at(requested, Utc::now()).await
    }

    /// Resumes `requested` if it is still live at `now`, otherwise starts a
    /// fresh session. Expired sessions are swept on every call.
    pub async fn open_at(&self, requested: Option<SessionId>, now: DateTime<Utc>) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;

        let expired = sessions.expire(now, self.idle_timeout);
        if expired > 0 {
            debug!("Expired {} idle session(s)", expired);
        }

        if let Some(id) = requested {
            if let Some(session) = sessions.touch(id, now) {
                return SessionHandle {
                    id,
                    created: false,
                    session,
                };
            }
        }

        while sessions.len() >= self.max_sessions {
            match sessions.pop_oldest() {
                Some(oldest) => warn!(
                    "Session limit of {} reached, evicted least recently used session {}",
                    self.max_sessions, oldest
                ),
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(id, now)));
        sessions.insert(
            id,
            SessionSlot {
                last_seen: now,
                session: Arc::clone(&session),
            },
        );
        info!("Started session {}", id);
        SessionHandle {
            id,
            created: true,
            session,
        }
    }

    /// Ends a session, discarding its histories. Returns whether it existed.
    pub async fn end(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().await.remove(id);
        if removed {
            info!("Ended session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.len() == 0
    }
}
