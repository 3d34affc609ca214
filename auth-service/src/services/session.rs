use crate::models::{LockoutPolicy, Session};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Process-local session registry. Sessions are keyed by an opaque UUID
/// carried in a cookie; the map is the only place session state lives, so
/// everything here evaporates on restart. That is acceptable for a
/// single-operator reporting tool; a multi-instance deployment would need
/// a shared expiring store instead.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<DashMap<Uuid, Session>>,
    policy: LockoutPolicy,
}

impl SessionManager {
    pub fn new(policy: LockoutPolicy) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            policy,
        }
    }

    /// Create a fresh unauthenticated session and return its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new());
        id
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Snapshot of the session state, if the id is known.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.get(&id).map(|s| s.clone())
    }

    /// Seconds left on an active lockout for this session.
    pub fn lockout_remaining(&self, id: Uuid, now: DateTime<Utc>) -> Option<u64> {
        self.sessions.get(&id)?.lockout_remaining(now)
    }

    pub fn record_failure(&self, id: Uuid, now: DateTime<Utc>) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.record_failure(now, &self.policy);
            if session.blocked_until.is_some() {
                tracing::warn!(session_id = %id, "Session locked out after repeated failures");
            }
        }
    }

    pub fn establish(&self, id: Uuid, display_name: String, organizational_unit_id: i32) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.establish(display_name, organizational_unit_id);
        }
    }

    /// Destroy the session entirely (logout).
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }
}
