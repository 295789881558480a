/*!
 * In-memory session store.
 *
 * One entry per user, created lazily on first access. Each entry carries its
 * own `tokio::sync::Mutex`, which the controller holds for the full handling
 * of one event (including the generation round trip). That serializes events
 * from the same user while leaving other users unaffected; the outer map
 * lock is a short-lived `parking_lot::Mutex` never held across an await.
 *
 * Nothing survives a process restart. Idle entries can be evicted with
 * `purge_idle`; with eviction disabled the store grows by one session per
 * user ever seen, matching the historical behavior.
 */

use chrono::{Duration, Utc};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::models::Session;

/// Handle to one user's session, locked per event by the controller
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// In-memory store of per-user sessions
#[derive(Debug, Default)]
pub struct SessionStore {
    /// All known sessions, keyed by user id
    sessions: Mutex<HashMap<i64, SessionHandle>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session handle for a user, creating a fresh session on first
    /// access. Creation is idempotent and has no failure mode.
    pub fn get(&self, user_id: i64) -> SessionHandle {
        let mut sessions = self.sessions.lock();
        sessions
            .entry(user_id)
            .or_insert_with(|| {
                debug!("Creating session for user {}", user_id);
                Arc::new(tokio::sync::Mutex::new(Session::new(user_id)))
            })
            .clone()
    }

    /// Remove a user's session entirely
    pub fn remove(&self, user_id: i64) -> bool {
        self.sessions.lock().remove(&user_id).is_some()
    }

    /// Whether a session exists for the user
    pub fn contains(&self, user_id: i64) -> bool {
        self.sessions.lock().contains_key(&user_id)
    }

    /// Number of stored sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Evict sessions idle longer than `max_idle`.
    ///
    /// Sessions currently locked by an in-flight event are skipped; they are
    /// active by definition. Returns the number of evicted sessions.
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.lock();
        let before = sessions.len();

        sessions.retain(|user_id, handle| match handle.try_lock() {
            Ok(session) => {
                let keep = session.last_activity >= cutoff;
                if !keep {
                    debug!("Evicting idle session for user {}", user_id);
                }
                keep
            }
            Err(_) => true,
        });

        before - sessions.len()
    }
}
