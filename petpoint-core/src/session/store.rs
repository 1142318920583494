//! Thread-safe session store with idle expiry

use super::clock::{Clock, SystemClock};
use super::types::{Exchange, Session};
use crate::config::SessionConfig;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Owns every live session behind one exclusive lock.
///
/// Sessions appear on their first [`append`](Self::append) and disappear on
/// [`reset`](Self::reset) or when [`sweep`](Self::sweep) finds them idle for
/// longer than the timeout. None of the operations fail, and no lock is held
/// across an await point.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    timeout: Duration,
    max_history: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a store using wall-clock time
    pub fn new(timeout: Duration) -> Self {
        Self::with_clock(timeout, Arc::new(SystemClock))
    }

    /// Create a store reading time from `clock`
    pub fn with_clock(timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout,
            max_history: None,
            clock,
        }
    }

    /// Create a store from the `session` config section
    pub fn from_config(config: &SessionConfig) -> Self {
        let store = Self::new(config.timeout());
        match config.max_history {
            Some(max) => store.with_max_history(max),
            None => store,
        }
    }

    /// Keep at most `max` exchanges per session, dropping the oldest first
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = Some(max);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_history(&self) -> Option<usize> {
        self.max_history
    }

    /// The clock used to stamp appends
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Append an exchange, creating the session if it does not exist yet
    pub fn append(&self, session_id: &str, message: Exchange) {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(now));
        session.push(message, now, self.max_history);
        debug!(
            session_id,
            history_len = session.history.len(),
            "Exchange appended to session"
        );
    }

    /// Drop a session and all its history. Unknown ids are ignored.
    pub fn reset(&self, session_id: &str) {
        if self.sessions.lock().remove(session_id).is_some() {
            info!(session_id, "Session reset");
        }
    }

    /// Remove every session idle for strictly longer than the timeout
    /// as of `now`, returning the removed ids.
    ///
    /// Expiry is decided and applied under one lock hold, so an append
    /// racing with the sweep either lands first and keeps the session alive
    /// or lands after and starts a fresh one.
    pub fn sweep(&self, now: DateTime<Utc>) -> HashSet<String> {
        let timeout = self.timeout;
        let mut expired = HashSet::new();

        let mut sessions = self.sessions.lock();
        sessions.retain(|session_id, session| {
            let idle = session.idle_for(now);
            if idle.is_some_and(|idle| idle > timeout) {
                expired.insert(session_id.clone());
                false
            } else {
                true
            }
        });
        let remaining = sessions.len();
        drop(sessions);

        for session_id in &expired {
            info!(session_id = %session_id, "Session expired after idle timeout");
        }
        debug!(expired = expired.len(), remaining, "Session sweep finished");
        expired
    }

    /// Copy of a session's history, oldest first
    pub fn history(&self, session_id: &str) -> Option<Vec<Exchange>> {
        self.sessions
            .lock()
            .get(session_id)
            .map(|s| s.history.clone())
    }

    /// Timestamp of the session's most recent append
    pub fn last_activity(&self, session_id: &str) -> Option<DateTime<Utc>> {
        self.sessions.lock().get(session_id).map(|s| s.last_activity)
    }

    /// Copy of the whole session record
    pub fn snapshot(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().get(session_id).cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.lock().contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Ids of all live sessions, in no particular order
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.lock().keys().cloned().collect()
    }
}
