//! Session data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One conversational turn: what the user said and what the bot answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub bot: String,
}

impl Exchange {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }
}

/// A conversation session
///
/// History and activity live in the same record, so a session either has
/// both or does not exist at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Exchanges in insertion order
    pub history: Vec<Exchange>,
    /// When the session was first seen
    pub created_at: DateTime<Utc>,
    /// When the last exchange was appended
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create an empty session stamped at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            history: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Append an exchange and refresh the activity timestamp.
    ///
    /// With `max_history`, the oldest exchanges are dropped so at most that
    /// many remain.
    pub fn push(&mut self, exchange: Exchange, now: DateTime<Utc>, max_history: Option<usize>) {
        self.history.push(exchange);
        if let Some(max) = max_history {
            let excess = self.history.len().saturating_sub(max);
            if excess > 0 {
                self.history.drain(..excess);
            }
        }
        self.last_activity = now;
    }

    /// Time since the last append, or `None` if `now` is earlier than it
    pub fn idle_for(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        (now - self.last_activity).to_std().ok()
    }
}
